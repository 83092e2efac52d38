//! Minimal Gemini client for our single use-case.
//!
//! We only call models/{model}:generateContent and constrain the output with a
//! responseSchema so the model returns a JSON array of question objects. The
//! successful response body is kept as raw text so the handler can relay it to
//! the browser byte-for-byte.
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};

use crate::config::{AppConfig, Prompts};
use crate::util::{fill_template, trunc_for_log};

#[derive(Clone)]
pub struct Gemini {
  pub client: reqwest::Client,
  api_key: String,
  pub base_url: String,
  pub model: String,
}

impl Gemini {
  /// Construct the client if the config carries an API key; otherwise None.
  pub fn from_config(cfg: &AppConfig) -> Option<Self> {
    let api_key = cfg.api_key.clone()?;

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(60))
      .build()
      .ok()?;

    Some(Self {
      client,
      api_key,
      base_url: cfg.base_url.clone(),
      model: cfg.model.clone(),
    })
  }

  /// The provider authenticates with the key in the query string.
  fn generate_url(&self) -> String {
    format!("{}/models/{}:generateContent?key={}", self.base_url, self.model, self.api_key)
  }

  /// One quiz generation call. Returns the raw upstream body on success so the
  /// caller can pass it through unmodified. Any transport error or non-success
  /// status becomes an Err carrying the diagnostic detail.
  #[instrument(level = "info", skip(self, prompts, difficulty), fields(model = %self.model, difficulty_len = difficulty.len()))]
  pub async fn generate_quiz(&self, prompts: &Prompts, difficulty: &str) -> Result<String, String> {
    let prompt = fill_template(&prompts.quiz_user_template, &[("difficulty", difficulty)]);
    let req = quiz_request(&prompt);

    let start = std::time::Instant::now();
    let res = self.client.post(self.generate_url())
      .header(USER_AGENT, "stockquiz-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(&req).send().await.map_err(|e| e.to_string())?;
    let elapsed = start.elapsed();

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_gemini_error(&body).unwrap_or_else(|| trunc_for_log(&body, 300));
      return Err(format!("Gemini HTTP {}: {}", status, msg));
    }

    let raw = res.text().await.map_err(|e| e.to_string())?;

    // Telemetry-only peek at the envelope; the relayed bytes stay untouched.
    match serde_json::from_str::<GenerateContentResponse>(&raw) {
      Ok(env) => {
        let usage = env.usage_metadata.unwrap_or_default();
        info!(
          ?elapsed,
          candidates = env.candidates.len(),
          prompt_tokens = ?usage.prompt_token_count,
          candidates_tokens = ?usage.candidates_token_count,
          "Gemini response received"
        );
      }
      Err(e) => {
        info!(?elapsed, error = %e, "Gemini response not in the usual envelope; relaying anyway");
      }
    }

    Ok(raw)
  }
}

/// Build the generateContent payload: the filled prompt plus the strict
/// question schema (array of {question, options, answer, explanation}).
fn quiz_request(prompt: &str) -> GenerateContentRequest {
  GenerateContentRequest {
    contents: vec![Content { parts: vec![Part { text: prompt.to_string() }] }],
    generation_config: GenerationConfig {
      response_mime_type: "application/json".into(),
      response_schema: json!({
        "type": "ARRAY",
        "items": {
          "type": "OBJECT",
          "properties": {
            "question": { "type": "STRING" },
            "options": { "type": "ARRAY", "items": { "type": "STRING" } },
            "answer": { "type": "STRING" },
            "explanation": { "type": "STRING" }
          },
          "required": ["question", "options", "answer", "explanation"]
        }
      }),
    },
  }
}

// --- Wire DTOs ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
  contents: Vec<Content>,
  generation_config: GenerationConfig,
}
#[derive(Serialize)]
struct Content { parts: Vec<Part> }
#[derive(Serialize)]
struct Part { text: String }
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
  response_mime_type: String,
  response_schema: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
  #[serde(default)] candidates: Vec<serde_json::Value>,
  #[serde(default)] usage_metadata: Option<UsageMetadata>,
}
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
  #[serde(default)] prompt_token_count: Option<u32>,
  #[serde(default)] candidates_token_count: Option<u32>,
}

/// Try to extract a clean error message from a Gemini error body.
fn extract_gemini_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
