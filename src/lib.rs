//! StockQuiz · Quiz Proxy Backend
//!
//! - Axum HTTP API with a single quiz-proxy endpoint
//! - Gemini integration behind a server-held API key
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT             : u16 (default 3000)
//!   GEMINI_API_KEY   : enables quiz generation; requests are rejected without it
//!   GEMINI_BASE_URL  : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL     : default "gemini-2.5-flash-preview-09-2025"
//!   QUIZ_CONFIG_PATH : path to TOML config (prompt template override)
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

pub mod telemetry;
pub mod util;
pub mod config;
pub mod protocol;
pub mod gemini;
pub mod state;
pub mod routes;
