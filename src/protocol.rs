//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

/// Returned when the server has no upstream credential configured.
pub const ERR_NO_API_KEY: &str = "API key not configured on the server.";
/// Returned for any upstream failure. Details stay in the server logs.
pub const ERR_UPSTREAM: &str = "Failed to fetch quiz questions.";

/// Body of `POST /api/get-quiz-questions`.
/// Difficulty is free-form; whatever string arrives is interpolated into the
/// prompt unchanged (missing field behaves like an empty string).
#[derive(Debug, Deserialize)]
pub struct QuizIn {
    #[serde(default)]
    pub difficulty: String,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
