//! Application state: resolved prompts and the optional Gemini client.
//!
//! Everything here is read-only after startup. Concurrent requests share the
//! state through an Arc without any locking; each request is independent.

use tracing::{info, instrument};

use crate::config::{AppConfig, Prompts};
use crate::gemini::Gemini;

#[derive(Clone)]
pub struct AppState {
    /// `None` when GEMINI_API_KEY is absent; quiz requests are then rejected
    /// before any outbound call.
    pub gemini: Option<Gemini>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from an explicit config: prompts + optional Gemini client.
    #[instrument(level = "info", skip_all)]
    pub fn new(cfg: &AppConfig) -> Self {
        let gemini = Gemini::from_config(cfg);
        if let Some(g) = &gemini {
            info!(target: "stockquiz_backend", base_url = %g.base_url, model = %g.model, "Gemini enabled.");
        } else {
            info!(target: "stockquiz_backend", "Gemini disabled (no GEMINI_API_KEY). Quiz requests will be rejected.");
        }

        Self {
            gemini,
            prompts: cfg.prompts.clone(),
        }
    }
}
