//! Ironframe GRC Dashboard API
//!
//! HTTP surface over the Ironframe core: health scoring, the audit trail,
//! tracked email and the tenant panes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          IRONFRAME API                                  │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         REST API                                 │   │
//! │  │     OpenAPI 3 | Swagger UI | { success, data, error } envelope   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐ │
//! │  │ /api/health- │  │  /api/audit  │  │  /api/email  │  │ /api/vendors│ │
//! │  │    score     │  │  risk | logs │  │ send | track │  │ assess|grade│ │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └─────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    TENANT GUARD (x-tenant-id)                    │   │
//! │  │      /medshield/*  |  /vaultbank/*  |  /gridcore/*               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

use axum::routing::{get, post};
use axum::Router;
use ironframe_core::{GrcStores, QuarantineLog, TenantKey};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use models::*;

/// API state
pub struct ApiState {
    /// Service name reported by the health check
    pub service: String,
    /// API version
    pub version: String,
    /// Risk acceptance, email and audit stores
    pub stores: GrcStores,
    /// Quarantine DMZ, kept apart from the primary stores
    pub dmz: QuarantineLog,
}

impl ApiState {
    /// Fresh stores sized from `config`
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            service: config.service_name.clone(),
            version: env!("CARGO_PKG_VERSION").into(),
            stores: GrcStores::with_limits(config.view_limit, config.audit_retention),
            dmz: QuarantineLog::with_limits(config.view_limit, config.audit_retention),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ironframe API",
        description = "Ironframe GRC Dashboard API - Governance, Risk and Compliance",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::score::compute_health_score,
        routes::score::global_entity_score,
        routes::audit::accept_risk,
        routes::audit::list_risk_acceptance,
        routes::audit::list_audit_logs,
        routes::audit::export_audit_logs,
        routes::audit::purge_audit_logs,
        routes::audit::export_audit_bundle,
        routes::email::send_email,
        routes::email::list_tracked_email,
        routes::vendors::assess_vendor,
        routes::vendors::grade_vendor_health,
        routes::tenants::tenant_score,
        routes::tenants::tenant_assets,
        routes::tenants::tenant_exposure,
        routes::tenants::tenant_impact,
        routes::tenants::tenant_risk_level,
        routes::tenants::quarantine_file,
        routes::tenants::list_quarantine,
    ),
    components(
        schemas(
            ErrorResponse, HealthStatus, PurgeRequest, DateRange, ExportRequest, ExportRange, ExportBundle,
            ExposureReport, RiskLevelReport, AssetInventory,
            ironframe_core::HealthScoreInput, ironframe_core::HealthScoreResult, ironframe_core::HealthGrade,
            ironframe_core::RiskAcceptanceRequest, ironframe_core::RiskAcceptanceDecision,
            ironframe_core::risk_acceptance::RiskDecision,
            ironframe_core::SendEmailInput, ironframe_core::TrackedEmailRecord, ironframe_core::email::ReadStatus,
            ironframe_core::AuditLogRecord, ironframe_core::AuditActionType, ironframe_core::AuditLogType,
            ironframe_core::PurgeReport, ironframe_core::ExportFormat,
            ironframe_core::TenantKey,
            ironframe_core::scoring::EntityAsset, ironframe_core::scoring::AssetStatus,
            ironframe_core::scoring::EntityScoreResult, ironframe_core::scoring::LetterGrade,
            ironframe_core::scoring::FinancialImpactResult, ironframe_core::scoring::ImpactSeverity,
            ironframe_core::scoring::VendorQuestionnaireInput, ironframe_core::scoring::VendorQuestionnaireResult,
            ironframe_core::scoring::VendorIndustry, ironframe_core::scoring::SyncStatus,
            ironframe_core::scoring::VendorHealthInput, ironframe_core::scoring::VendorHealthScore,
            ironframe_core::scoring::RiskLevel,
            ironframe_core::quarantine::QuarantineRequest, ironframe_core::QuarantineRecord,
            ironframe_core::quarantine::QuarantineStatus
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "scoring", description = "Health and entity scoring"),
        (name = "audit", description = "Risk acceptance and audit trail"),
        (name = "email", description = "Tracked outbound email"),
        (name = "vendors", description = "Vendor risk assessment"),
        (name = "tenants", description = "Tenant-isolated panes")
    )
)]
pub struct ApiDoc;

/// Build the API router
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes())
        .merge(tenant_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn api_routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health-score", post(routes::score::compute_health_score))
        .route("/entity-score", get(routes::score::global_entity_score))
        .route("/vendors/assessment", post(routes::vendors::assess_vendor))
        .route("/vendors/health-grade", post(routes::vendors::grade_vendor_health))
        .nest("/audit", routes::audit::router())
        .nest("/email", routes::email::router())
}

fn tenant_routes() -> Router<Arc<ApiState>> {
    TenantKey::ALL.into_iter().fold(Router::new(), |router, tenant| {
        router.nest(
            tenant.route_prefix(),
            routes::tenants::router().route_layer(axum::middleware::from_fn(middleware::tenant::tenant_guard)),
        )
    })
}
