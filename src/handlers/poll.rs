use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::AppState;
use crate::config::TargetEntry;
use crate::formatter::JsonFormatter;
use crate::models::PollRequest;

#[derive(Debug, Serialize)]
pub struct TargetSummary {
    pub name: String,
    pub address: String,
    pub oids: usize,
}

pub async fn list_targets(State(state): State<AppState>) -> Json<Vec<TargetSummary>> {
    Json(
        state
            .config
            .targets
            .iter()
            .map(|t| TargetSummary {
                name: t.name.clone(),
                address: t.address.clone(),
                oids: t.value_ids.len(),
            })
            .collect(),
    )
}

/// Polls one configured target by name
pub async fn poll_target(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    let target = state
        .config
        .target(&name)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Unknown target '{}'", name)))?;

    let report = state.poller.poll(target).await;
    Ok(Json(JsonFormatter::format_report(&report)).into_response())
}

/// Polls a target described in the request body, using the configured defaults
pub async fn poll_adhoc(
    State(state): State<AppState>,
    Json(params): Json<PollRequest>,
) -> Result<Response, (StatusCode, String)> {
    let target = TargetEntry::from(params)
        .resolve(0, &state.config.defaults)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let report = state.poller.poll(&target).await;
    Ok(Json(JsonFormatter::format_report(&report)).into_response())
}
