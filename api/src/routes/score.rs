//! Scoring endpoints

use crate::error::ApiResult;
use crate::models::{ApiResponse, ErrorResponse};
use axum::{extract::rejection::JsonRejection, Json};
use ironframe_core::scoring::{build_aggregate_entity_data, calculate_entity_score, entity_seed, EntityScoreResult};
use ironframe_core::{calculate_health_score, HealthScoreInput, HealthScoreResult, TenantKey};

/// Compute a tenant health score
#[utoipa::path(
    post,
    path = "/api/health-score",
    request_body = HealthScoreInput,
    responses(
        (status = 200, description = "Score and grade", body = HealthScoreResult),
        (status = 400, description = "Malformed input", body = ErrorResponse)
    ),
    tag = "scoring"
)]
pub async fn compute_health_score(
    payload: Result<Json<HealthScoreInput>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<HealthScoreResult>>> {
    let Json(input) = payload?;
    Ok(Json(ApiResponse::success(calculate_health_score(&input))))
}

/// Portfolio-wide entity score across every tenant
#[utoipa::path(
    get,
    path = "/api/entity-score",
    responses(
        (status = 200, description = "GLOBAL entity score", body = EntityScoreResult)
    ),
    tag = "scoring"
)]
pub async fn global_entity_score() -> Json<ApiResponse<EntityScoreResult>> {
    let entities: Vec<_> = TenantKey::ALL.into_iter().map(entity_seed).collect();
    Json(ApiResponse::success(calculate_entity_score(&build_aggregate_entity_data(&entities))))
}
