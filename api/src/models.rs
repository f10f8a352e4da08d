//! API Models

use chrono::{DateTime, NaiveDate, Utc};
use ironframe_core::scoring::RiskLevel;
use ironframe_core::{RiskAcceptanceDecision, TenantKey, TrackedEmailRecord};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// False whenever `error` is set
    pub success: bool,
    /// Payload on success
    pub data: Option<T>,
    /// Failure detail
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope around `data`
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    /// Failed envelope with no data
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable code, e.g. `VALIDATION_FAILED`
    pub code: String,
    /// Human-readable message
    pub message: String,
}

// ============ Health ============

/// Liveness report
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub checked_at: DateTime<Utc>,
}

// ============ Audit ============

/// TTL purge request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurgeRequest {
    /// Days to keep non-GRC records, 2555 when absent
    pub ttl_days: Option<i64>,
}

/// Inclusive export window
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[allow(missing_docs)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Audit export request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Tenant to export, required
    pub entity_id: Option<TenantKey>,
    /// Window to export, both ends required
    pub date_range: Option<DateRange>,
}

/// Resolved export window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[allow(missing_docs)]
pub struct ExportRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Audit evidence bundle for one tenant
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    /// Exported tenant
    pub entity_id: TenantKey,
    /// Upper-case tenant label
    pub entity_label: String,
    /// Inclusive window applied
    pub range: ExportRange,
    /// When the bundle was assembled
    pub exported_at: DateTime<Utc>,
    /// Retention status line
    pub retention: String,
    /// Every retained decision inside the window
    pub risk_acceptance: Vec<RiskAcceptanceDecision>,
    /// Every retained email receipt inside the window
    pub email_receipts: Vec<TrackedEmailRecord>,
}

// ============ Tenants ============

/// Tenant financial exposure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExposureReport {
    /// Target tenant
    pub tenant: TenantKey,
    /// Exposure in whole USD
    pub exposure: i64,
}

/// ALE classified against the tenant's risk appetite
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskLevelReport {
    /// Target tenant
    pub tenant: TenantKey,
    /// Annualised loss expectancy, cents
    pub ale_cents: i64,
    /// Tenant's average breach liability, cents
    pub threshold_cents: i64,
    /// Resulting level
    pub level: RiskLevel,
}

/// Tenant asset inventory
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssetInventory {
    /// Upper-case tenant label
    pub tenant: String,
    /// Seeded assets
    pub assets: Vec<ironframe_core::scoring::EntityAsset>,
}
