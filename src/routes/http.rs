//! HTTP endpoint handlers. The quiz handler owns the whole relay flow:
//! credential check, one upstream call, verbatim pass-through or a fixed
//! JSON error body. Failure detail goes to the logs, never to the caller.

use std::sync::Arc;
use axum::{
  extract::State,
  http::{header, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use tracing::{error, info, instrument};

use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

/// `POST /api/get-quiz-questions` — relay one quiz generation.
/// Every failure path is terminal for the request: nothing is retried.
#[instrument(level = "info", skip(state, body), fields(difficulty = %body.difficulty))]
pub async fn http_post_quiz(
  State(state): State<Arc<AppState>>,
  Json(body): Json<QuizIn>,
) -> Response {
  // Fail fast before any network I/O when the credential is absent.
  let Some(gemini) = &state.gemini else {
    error!(target: "quiz", "GEMINI_API_KEY not set; rejecting quiz request");
    return error_response(ERR_NO_API_KEY);
  };

  match gemini.generate_quiz(&state.prompts, &body.difficulty).await {
    Ok(raw) => {
      info!(target: "quiz", difficulty = %body.difficulty, bytes = raw.len(), "Quiz served");
      (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], raw).into_response()
    }
    Err(e) => {
      error!(target: "quiz", difficulty = %body.difficulty, error = %e, "Quiz generation failed");
      error_response(ERR_UPSTREAM)
    }
  }
}

fn error_response(message: &str) -> Response {
  (
    StatusCode::INTERNAL_SERVER_ERROR,
    Json(ErrorOut { error: message.to_string() }),
  )
    .into_response()
}
