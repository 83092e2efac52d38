use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use stockquiz_backend::config::AppConfig;
use stockquiz_backend::routes::build_router;
use stockquiz_backend::state::AppState;
use stockquiz_backend::telemetry;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Resolve configuration once; handlers never read env on their own.
  let cfg = AppConfig::from_env();

  // Build shared application state (prompts + optional Gemini client).
  let state = Arc::new(AppState::new(&cfg));

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "stockquiz_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
