//! Integration tests for the quiz proxy.
//!
//! Each test runs the real app on a random port against a scripted mock
//! upstream, so no network access and no GEMINI_API_KEY are needed. Configs
//! are built literally; process env is never touched.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Router};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use stockquiz_backend::config::{AppConfig, Prompts, DEFAULT_MODEL};
use stockquiz_backend::routes::build_router;
use stockquiz_backend::state::AppState;

const UPSTREAM_OK_BODY: &str = r#"{"candidates":[{"content":{"parts":[{"text":"[{\"question\":\"What does IPO stand for?\",\"options\":[\"Initial Public Offering\",\"Internal Price Option\",\"Indexed Portfolio Order\",\"Issued Private Offer\"],\"answer\":\"Initial Public Offering\",\"explanation\":\"An IPO is the first sale of a company's shares to the public.\"}]"}]},"finishReason":"STOP"}],"usageMetadata":{"promptTokenCount":52,"candidatesTokenCount":118}}"#;

/// Scripted upstream: fixed status/body, counts hits, remembers the last
/// request body it saw.
struct MockUpstream {
  status: StatusCode,
  body: &'static str,
  hits: AtomicUsize,
  last_request: Mutex<Option<String>>,
}

async fn mock_generate(
  State(mock): State<Arc<MockUpstream>>,
  body: String,
) -> (StatusCode, String) {
  mock.hits.fetch_add(1, Ordering::SeqCst);
  *mock.last_request.lock().await = Some(body);
  (mock.status, mock.body.to_string())
}

/// Bind the mock on 127.0.0.1:0 and return (base_url, handle to its script).
async fn spawn_mock_upstream(
  status: StatusCode,
  body: &'static str,
) -> (String, Arc<MockUpstream>) {
  let mock = Arc::new(MockUpstream {
    status,
    body,
    hits: AtomicUsize::new(0),
    last_request: Mutex::new(None),
  });

  // The client posts to /models/{model}:generateContent; the whole last
  // segment (colon included) lands in one path param.
  let app = Router::new()
    .route("/models/:call", post(mock_generate))
    .with_state(mock.clone());

  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });

  (format!("http://{}", addr), mock)
}

/// Spawn the app pointed at the given upstream; returns its base URL.
async fn spawn_app(api_key: Option<&str>, upstream_base: &str) -> String {
  let cfg = AppConfig {
    port: 0,
    api_key: api_key.map(|k| k.to_string()),
    base_url: upstream_base.to_string(),
    model: DEFAULT_MODEL.to_string(),
    prompts: Prompts::default(),
  };
  let app = build_router(Arc::new(AppState::new(&cfg)));

  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr: SocketAddr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });

  format!("http://{}", addr)
}

async fn post_quiz(base: &str, difficulty: &str) -> reqwest::Response {
  reqwest::Client::new()
    .post(format!("{}/api/get-quiz-questions", base))
    .json(&serde_json::json!({ "difficulty": difficulty }))
    .send()
    .await
    .expect("Failed to send request")
}

#[tokio::test]
async fn missing_api_key_short_circuits_before_any_upstream_call() {
  let (upstream, mock) = spawn_mock_upstream(StatusCode::OK, UPSTREAM_OK_BODY).await;
  let base = spawn_app(None, &upstream).await;

  let res = post_quiz(&base, "easy").await;

  assert_eq!(res.status().as_u16(), 500);
  let body: serde_json::Value = res.json().await.unwrap();
  assert_eq!(
    body,
    serde_json::json!({ "error": "API key not configured on the server." })
  );
  assert_eq!(mock.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upstream_success_passes_body_through_verbatim() {
  let (upstream, mock) = spawn_mock_upstream(StatusCode::OK, UPSTREAM_OK_BODY).await;
  let base = spawn_app(Some("test-key"), &upstream).await;

  let res = post_quiz(&base, "easy").await;

  assert_eq!(res.status().as_u16(), 200);
  let body = res.text().await.unwrap();
  assert_eq!(body, UPSTREAM_OK_BODY);
  assert_eq!(mock.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn upstream_rate_limit_maps_to_generic_failure_body() {
  let (upstream, _mock) = spawn_mock_upstream(
    StatusCode::TOO_MANY_REQUESTS,
    r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#,
  )
  .await;
  let base = spawn_app(Some("test-key"), &upstream).await;

  let res = post_quiz(&base, "hard").await;

  assert_eq!(res.status().as_u16(), 500);
  let body: serde_json::Value = res.json().await.unwrap();
  assert_eq!(
    body,
    serde_json::json!({ "error": "Failed to fetch quiz questions." })
  );
}

#[tokio::test]
async fn identical_requests_get_identical_responses() {
  let (upstream, mock) = spawn_mock_upstream(StatusCode::OK, UPSTREAM_OK_BODY).await;
  let base = spawn_app(Some("test-key"), &upstream).await;

  let first = post_quiz(&base, "medium").await.text().await.unwrap();
  let second = post_quiz(&base, "medium").await.text().await.unwrap();

  assert_eq!(first, second);
  assert_eq!(mock.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn difficulty_string_reaches_the_upstream_prompt_unchanged() {
  let (upstream, mock) = spawn_mock_upstream(StatusCode::OK, UPSTREAM_OK_BODY).await;
  let base = spawn_app(Some("test-key"), &upstream).await;

  // Deliberately not one of easy/medium/hard: the server interpolates any string.
  post_quiz(&base, "ruthless").await;

  let seen = mock.last_request.lock().await.clone().expect("mock saw no request");
  let payload: serde_json::Value = serde_json::from_str(&seen).unwrap();
  let prompt = payload["contents"][0]["parts"][0]["text"].as_str().unwrap();
  assert!(prompt.contains("must be 'ruthless'"));
  assert!(prompt.contains("exactly 10 multiple-choice quiz questions"));
  assert_eq!(payload["generationConfig"]["responseMimeType"], "application/json");
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
  let (upstream, _mock) = spawn_mock_upstream(StatusCode::OK, UPSTREAM_OK_BODY).await;
  let base = spawn_app(Some("test-key"), &upstream).await;

  let res = reqwest::get(format!("{}/api/health", base)).await.unwrap();

  assert!(res.status().is_success());
  let body: serde_json::Value = res.json().await.unwrap();
  assert_eq!(body, serde_json::json!({ "ok": true }));
}
