use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers::{AppState, health, list_targets, poll_adhoc, poll_target};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/targets", get(list_targets))
        .route("/targets/{name}/poll", post(poll_target))
        .route("/poll", post(poll_adhoc))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the API on `listen` until Ctrl-C
pub async fn serve(state: AppState, listen: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("Cannot bind {}", listen))?;
    info!(address = %listen, "HTTP API listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("HTTP server failed")
}
