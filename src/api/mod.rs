pub mod error;
pub mod handlers;
pub mod state;
pub mod types;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::chat::LlmConfig;
use crate::mock;

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::metric::health))
        .route("/tools/registry", get(handlers::metric::registry))
        .route("/tools/compute_metric", post(handlers::metric::compute))
        .route("/llm/ask", post(handlers::ask::ask))
        .route("/chat", post(handlers::chat::chat_turn))
        .route("/export/{table}", get(handlers::export::export_table))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(host: &str, port: u16, seed: u64) -> Result<()> {
    let llm = LlmConfig::from_env();
    if llm.is_none() {
        tracing::warn!("OPTFLOW_AI_KEY not set - /llm/ask and delegated chat routing are disabled");
    }

    let state = AppState::new(seed, mock::default_tickers(), llm);
    let app = router(state);

    let addr = format!("{host}:{port}");
    tracing::info!("optflow API server listening on {addr}");
    tracing::info!("  Health:   GET  http://{addr}/health");
    tracing::info!("  Registry: GET  http://{addr}/tools/registry");
    tracing::info!("  Metric:   POST http://{addr}/tools/compute_metric");
    tracing::info!("  Ask:      POST http://{addr}/llm/ask");
    tracing::info!("  Chat:     POST http://{addr}/chat");
    tracing::info!("  Export:   GET  http://{addr}/export/trades");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;

    axum::serve(listener, app).await.context("running server")?;

    Ok(())
}
