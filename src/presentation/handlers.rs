// HTTP request handlers
use crate::domain::telemetry::StatsPayload;
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Current snapshot plus history, same shape as a push update
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsPayload>, ApiError> {
    Ok(Json(state.stats_service.current()?))
}
