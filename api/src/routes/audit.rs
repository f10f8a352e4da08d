//! Audit endpoints: risk acceptance, audit trail, purge and export

use crate::error::ApiResult;
use crate::{models::*, ApiState};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use ironframe_core::audit::DEFAULT_IP;
use ironframe_core::retention::{retention_status_label, RETENTION_PERIOD_DAYS};
use ironframe_core::{
    AuditLogRecord, ExportFormat, IronframeError, PurgeReport, RiskAcceptanceDecision, RiskAcceptanceRequest,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use utoipa::IntoParams;

/// Routes nested under `/api/audit`
pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/risk-acceptance", get(list_risk_acceptance).post(accept_risk))
        .route("/logs", get(list_audit_logs))
        .route("/logs/export", get(export_audit_logs))
        .route("/purge", post(purge_audit_logs))
        .route("/export", post(export_audit_bundle))
}

/// Accept the risk on an alert
#[utoipa::path(
    post,
    path = "/api/audit/risk-acceptance",
    request_body = RiskAcceptanceRequest,
    responses(
        (status = 200, description = "Decision recorded", body = RiskAcceptanceDecision),
        (status = 400, description = "alertId missing", body = ErrorResponse)
    ),
    tag = "audit"
)]
pub async fn accept_risk(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<RiskAcceptanceDecision>>> {
    // an unreadable body is treated as one without an alertId
    let body = payload.map(|Json(body)| body).unwrap_or(Value::Null);
    let request = RiskAcceptanceRequest {
        alert_id: scalar_text(&body["alertId"]),
        actor: scalar_text(&body["actor"]),
        reason: scalar_text(&body["reason"]),
    };
    let decision = state.stores.accept_risk(request, &caller_ip(&headers), Utc::now())?;
    Ok(Json(ApiResponse::success(decision)))
}

/// List risk acceptance decisions, most recent first
#[utoipa::path(
    get,
    path = "/api/audit/risk-acceptance",
    responses(
        (status = 200, description = "Up to 200 decisions", body = Vec<RiskAcceptanceDecision>)
    ),
    tag = "audit"
)]
pub async fn list_risk_acceptance(
    State(state): State<Arc<ApiState>>,
) -> Json<ApiResponse<Vec<RiskAcceptanceDecision>>> {
    Json(ApiResponse::success(state.stores.risk_acceptance.list()))
}

/// List the audit trail with sensitive data masked.
///
/// Opening the trail counts as the day's session login.
#[utoipa::path(
    get,
    path = "/api/audit/logs",
    responses(
        (status = 200, description = "Up to 200 masked audit records", body = Vec<AuditLogRecord>)
    ),
    tag = "audit"
)]
pub async fn list_audit_logs(State(state): State<Arc<ApiState>>) -> Json<ApiResponse<Vec<AuditLogRecord>>> {
    state.stores.audit.ensure_login_event(Utc::now());
    let records = state.stores.audit.list().iter().map(AuditLogRecord::masked).collect();
    Json(ApiResponse::success(records))
}

/// Query for the raw audit export
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExportQuery {
    /// `json` (default) or `csv`
    format: Option<ExportFormat>,
}

/// Download every retained audit record
#[utoipa::path(
    get,
    path = "/api/audit/logs/export",
    params(ExportQuery),
    responses(
        (status = 200, description = "Audit records as JSON or CSV"),
        (status = 400, description = "Unknown format", body = ErrorResponse)
    ),
    tag = "audit"
)]
pub async fn export_audit_logs(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(query) = query?;
    let format = query.format.unwrap_or_default();
    let body = state.stores.audit.export(format)?;
    let content_type = match format {
        ExportFormat::Json => "application/json",
        ExportFormat::Csv => "text/csv; charset=utf-8",
    };
    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

/// Drop non-GRC audit records older than the TTL
#[utoipa::path(
    post,
    path = "/api/audit/purge",
    request_body = PurgeRequest,
    responses(
        (status = 200, description = "Purge counts", body = PurgeReport)
    ),
    tag = "audit"
)]
pub async fn purge_audit_logs(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<PurgeRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<PurgeReport>>> {
    let Json(request) = payload?;
    let ttl_days = request.ttl_days.unwrap_or(RETENTION_PERIOD_DAYS);
    if ttl_days < 0 {
        return Err(IronframeError::Validation("ttlDays must not be negative.".into()).into());
    }
    Ok(Json(ApiResponse::success(state.stores.audit.purge_expired(ttl_days, Utc::now()))))
}

/// Assemble the audit evidence bundle for one tenant
#[utoipa::path(
    post,
    path = "/api/audit/export",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Evidence bundle", body = ExportBundle),
        (status = 400, description = "entityId or dateRange missing", body = ErrorResponse)
    ),
    tag = "audit"
)]
pub async fn export_audit_bundle(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<ExportBundle>>> {
    let request = payload.map(|Json(request)| request).unwrap_or_default();
    let (entity_id, from, to) = match (request.entity_id, request.date_range) {
        (Some(entity_id), Some(DateRange { from: Some(from), to: Some(to) })) => (entity_id, from, to),
        _ => {
            return Err(IronframeError::Validation(
                "entityId and dateRange.from/dateRange.to are required.".into(),
            )
            .into())
        }
    };
    if from > to {
        return Err(IronframeError::Validation("dateRange.from must not be after dateRange.to.".into()).into());
    }

    let in_range = |timestamp: DateTime<Utc>| (from..=to).contains(&timestamp.date_naive());
    let bundle = ExportBundle {
        entity_id,
        entity_label: entity_id.label().to_string(),
        range: ExportRange { from, to },
        exported_at: Utc::now(),
        retention: retention_status_label(),
        risk_acceptance: state
            .stores
            .risk_acceptance
            .snapshot()
            .into_iter()
            .filter(|decision| in_range(decision.created_at))
            .collect(),
        email_receipts: state
            .stores
            .email
            .snapshot()
            .into_iter()
            .filter(|record| in_range(record.sent_time))
            .collect(),
    };

    tracing::info!(tenant = %entity_id, %from, %to, "Audit bundle exported");
    Ok(Json(ApiResponse::success(bundle)))
}

/// Text of a JSON string or number. Anything else reads as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// First `x-forwarded-for` hop, or loopback when absent
fn caller_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .unwrap_or(DEFAULT_IP)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_caller_ip_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(" 203.0.113.7 , 10.0.0.1"));
        assert_eq!(caller_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&Value::from("a1")), Some("a1".to_string()));
        assert_eq!(scalar_text(&Value::from(5)), Some("5".to_string()));
        assert_eq!(scalar_text(&Value::Null), None);
        assert_eq!(scalar_text(&serde_json::json!({ "id": 1 })), None);
    }

    #[test]
    fn test_caller_ip_defaults_to_loopback() {
        assert_eq!(caller_ip(&HeaderMap::new()), "127.0.0.1");

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        assert_eq!(caller_ip(&headers), "127.0.0.1");
    }
}
