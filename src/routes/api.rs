// JSON API handlers: stats, interface list, interface switch

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;
use crate::models::StatsPayload;

#[derive(Debug, Deserialize)]
pub(super) struct SwitchRequest {
    interface: String,
}

#[derive(Debug, Serialize)]
pub(super) struct InterfacesResponse {
    interfaces: Vec<String>,
    current: String,
}

/// GET /api/stats — latest snapshot with two-decimal string fields.
pub(super) async fn stats_handler(State(state): State<AppState>) -> Json<StatsPayload> {
    Json(StatsPayload::from(state.latest().as_ref()))
}

/// GET /api/interfaces — available interfaces and the current selection ("" when none).
pub(super) async fn interfaces_handler(
    State(state): State<AppState>,
) -> Result<Json<InterfacesResponse>, ApiError> {
    let registry = state.registry.clone();
    let interfaces = tokio::task::spawn_blocking(move || registry.interfaces()).await?;
    Ok(Json(InterfacesResponse {
        interfaces,
        current: state.registry.selected().unwrap_or_default(),
    }))
}

/// POST /api/switch-interface — `{"interface": name}`. 400 on a bad body or unknown name.
pub(super) async fn switch_interface_handler(
    State(state): State<AppState>,
    body: Result<Json<SwitchRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(req) = body.map_err(|e| {
        tracing::debug!(error = %e, operation = "switch_interface", "rejected request body");
        ApiError::MalformedRequest(e.body_text())
    })?;
    let registry = state.registry.clone();
    tokio::task::spawn_blocking(move || registry.select(&req.interface))
        .await?
        .inspect_err(|e| {
            tracing::info!(error = %e, operation = "switch_interface", "interface switch rejected");
        })?;
    Ok(Json(serde_json::json!({ "status": "success" })))
}
