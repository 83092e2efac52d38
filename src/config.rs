//! Process configuration, resolved once at startup, plus the optional TOML
//! prompt layer (QUIZ_CONFIG_PATH).
//!
//! `AppConfig` is built in `main` and handed to `AppState::new`, so handlers
//! never read ambient env and tests can construct configs literally.

use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

#[derive(Clone, Debug)]
pub struct AppConfig {
  pub port: u16,
  /// Upstream credential. `None` means quiz requests are rejected before any
  /// network call is made.
  pub api_key: Option<String>,
  pub base_url: String,
  pub model: String,
  pub prompts: Prompts,
}

impl AppConfig {
  /// Read PORT, GEMINI_* and the optional TOML prompt config from env.
  pub fn from_env() -> Self {
    let port = std::env::var("PORT")
      .ok()
      .and_then(|p| p.parse::<u16>().ok())
      .unwrap_or(DEFAULT_PORT);
    let api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
    let base_url =
      std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
    let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
    let prompts = load_quiz_config_from_env()
      .map(|c| c.prompts)
      .unwrap_or_default();

    Self { port, api_key, base_url, model, prompts }
  }
}

/// Root of the TOML file accepted via QUIZ_CONFIG_PATH.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct QuizConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompt used when composing the upstream request. The default reproduces the
/// stock-market quiz instruction; override it in TOML to tune tone/topic.
/// `{difficulty}` is replaced with the caller-supplied string as-is.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub quiz_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      quiz_user_template: "Generate exactly 10 multiple-choice quiz questions for a quiz about the stock market. The difficulty level must be '{difficulty}'. Topics should be appropriate for this level. Each question must have 4 options, one correct answer, and a brief, simple explanation for the answer.".into(),
    }
  }
}

/// Attempt to load `QuizConfig` from QUIZ_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_quiz_config_from_env() -> Option<QuizConfig> {
  let path = std::env::var("QUIZ_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<QuizConfig>(&s) {
      Ok(cfg) => {
        info!(target: "stockquiz_backend", %path, "Loaded quiz config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "stockquiz_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "stockquiz_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
