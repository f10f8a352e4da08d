//! Health check endpoint

use crate::{models::*, ApiState};
use axum::{extract::State, Json};
use std::sync::Arc;

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<ApiState>>) -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus {
        status: "HEALTHY".into(),
        service: state.service.clone(),
        version: state.version.clone(),
        checked_at: chrono::Utc::now(),
    }))
}
