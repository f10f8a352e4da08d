//! Tenant panes
//!
//! Mounted once per tenant under its route prefix, behind
//! [`crate::middleware::tenant::tenant_guard`], which supplies the resolved
//! [`TenantKey`] as a request extension.

use crate::error::ApiResult;
use crate::middleware::tenant::TENANT_HEADER;
use crate::{models::*, ApiState};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Extension, Json, Router};
use ironframe_core::quarantine::QuarantineRequest;
use ironframe_core::scoring::{
    calculate_entity_score, calculate_financial_impact, calculate_risk_level, entity_seed, risk_threshold_cents,
    tenant_financial_exposure, EntityScoreResult, FinancialImpactResult, ImpactOptions, ImpactSeverity,
};
use ironframe_core::{QuarantineRecord, TenantKey};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

/// Routes mounted under each tenant's prefix
pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/score", get(tenant_score))
        .route("/assets", get(tenant_assets))
        .route("/exposure", get(tenant_exposure))
        .route("/impact", get(tenant_impact))
        .route("/risk-level", get(tenant_risk_level))
        .route("/quarantine", get(list_quarantine).post(quarantine_file))
}

/// Entity score for the tenant's seeded posture
#[utoipa::path(
    get,
    path = "/{tenant}/score",
    params(("tenant" = TenantKey, Path, description = "Tenant code")),
    responses(
        (status = 200, description = "Entity score", body = EntityScoreResult),
        (status = 403, description = "Active tenant differs", body = ErrorResponse)
    ),
    tag = "tenants"
)]
pub async fn tenant_score(Extension(tenant): Extension<TenantKey>) -> Json<ApiResponse<EntityScoreResult>> {
    Json(ApiResponse::success(calculate_entity_score(&entity_seed(tenant))))
}

/// Tenant asset inventory
#[utoipa::path(
    get,
    path = "/{tenant}/assets",
    params(("tenant" = TenantKey, Path, description = "Tenant code")),
    responses(
        (status = 200, description = "Assets", body = AssetInventory),
        (status = 403, description = "Active tenant differs", body = ErrorResponse)
    ),
    tag = "tenants"
)]
pub async fn tenant_assets(Extension(tenant): Extension<TenantKey>) -> Json<ApiResponse<AssetInventory>> {
    Json(ApiResponse::success(AssetInventory {
        tenant: tenant.label().to_string(),
        assets: entity_seed(tenant).assets,
    }))
}

/// Financial exposure from the tenant's industry factors
#[utoipa::path(
    get,
    path = "/{tenant}/exposure",
    params(("tenant" = TenantKey, Path, description = "Tenant code")),
    responses(
        (status = 200, description = "Exposure in USD", body = ExposureReport),
        (status = 403, description = "Active tenant differs", body = ErrorResponse)
    ),
    tag = "tenants"
)]
pub async fn tenant_exposure(
    Extension(tenant): Extension<TenantKey>,
    headers: HeaderMap,
) -> ApiResult<Json<ApiResponse<ExposureReport>>> {
    let active = headers.get(TENANT_HEADER).and_then(|value| value.to_str().ok());
    let exposure = tenant_financial_exposure(active, tenant)?;
    Ok(Json(ApiResponse::success(ExposureReport { tenant, exposure })))
}

/// Impact modelling parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ImpactQuery {
    /// Incident severity, defaults to CRITICAL
    severity: Option<ImpactSeverity>,
    /// Overrides the severity multiplier
    complexity_multiplier: Option<f64>,
    /// Regulatory fine added to the total
    potential_fine: Option<f64>,
}

/// Modelled cost of an incident for the tenant
#[utoipa::path(
    get,
    path = "/{tenant}/impact",
    params(("tenant" = TenantKey, Path, description = "Tenant code"), ImpactQuery),
    responses(
        (status = 200, description = "Impact breakdown", body = FinancialImpactResult),
        (status = 400, description = "Malformed query", body = ErrorResponse),
        (status = 403, description = "Active tenant differs", body = ErrorResponse)
    ),
    tag = "tenants"
)]
pub async fn tenant_impact(
    Extension(tenant): Extension<TenantKey>,
    query: Result<Query<ImpactQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<FinancialImpactResult>>> {
    let Query(query) = query?;
    let options = ImpactOptions {
        complexity_multiplier: query.complexity_multiplier,
        potential_fine: query.potential_fine,
    };
    let severity = query.severity.unwrap_or(ImpactSeverity::Critical);
    Ok(Json(ApiResponse::success(calculate_financial_impact(tenant, severity, options))))
}

/// ALE to classify
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct RiskLevelQuery {
    /// Annualised loss expectancy in cents
    ale_cents: i64,
}

/// Classify an ALE against the tenant's risk appetite
#[utoipa::path(
    get,
    path = "/{tenant}/risk-level",
    params(("tenant" = TenantKey, Path, description = "Tenant code"), RiskLevelQuery),
    responses(
        (status = 200, description = "Risk level", body = RiskLevelReport),
        (status = 400, description = "aleCents missing or negative", body = ErrorResponse),
        (status = 403, description = "Active tenant differs", body = ErrorResponse)
    ),
    tag = "tenants"
)]
pub async fn tenant_risk_level(
    Extension(tenant): Extension<TenantKey>,
    query: Result<Query<RiskLevelQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<RiskLevelReport>>> {
    let Query(query) = query?;
    let threshold_cents = risk_threshold_cents(tenant);
    let level = calculate_risk_level(query.ale_cents, threshold_cents)?;
    Ok(Json(ApiResponse::success(RiskLevelReport { tenant, ale_cents: query.ale_cents, threshold_cents, level })))
}

/// Place an uploaded file in the DMZ pending review
#[utoipa::path(
    post,
    path = "/{tenant}/quarantine",
    params(("tenant" = TenantKey, Path, description = "Tenant code")),
    request_body = QuarantineRequest,
    responses(
        (status = 201, description = "File quarantined", body = QuarantineRecord),
        (status = 400, description = "fileName missing", body = ErrorResponse),
        (status = 403, description = "Active tenant differs", body = ErrorResponse)
    ),
    tag = "tenants"
)]
pub async fn quarantine_file(
    State(state): State<Arc<ApiState>>,
    Extension(tenant): Extension<TenantKey>,
    payload: Result<Json<QuarantineRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<QuarantineRecord>>)> {
    let request = payload.map(|Json(request)| request).unwrap_or_default();
    let file_name = request.file_name.unwrap_or_default();
    let record = state.dmz.quarantine(&file_name, Some(tenant), request.file_size)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(record))))
}

/// Files quarantined for the tenant, most recent first
#[utoipa::path(
    get,
    path = "/{tenant}/quarantine",
    params(("tenant" = TenantKey, Path, description = "Tenant code")),
    responses(
        (status = 200, description = "Quarantined files", body = Vec<QuarantineRecord>),
        (status = 403, description = "Active tenant differs", body = ErrorResponse)
    ),
    tag = "tenants"
)]
pub async fn list_quarantine(
    State(state): State<Arc<ApiState>>,
    Extension(tenant): Extension<TenantKey>,
) -> Json<ApiResponse<Vec<QuarantineRecord>>> {
    Json(ApiResponse::success(state.dmz.list_for(tenant)))
}
