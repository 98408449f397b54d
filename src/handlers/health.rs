use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use super::AppState;

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "time": chrono::Utc::now().to_rfc3339(),
            "targets": state.config.targets.len(),
        })),
    )
}
