//! Ironframe GRC Core
//!
//! Tenant-scoped governance, risk and compliance primitives behind the
//! Ironframe monitoring dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         IRONFRAME GRC CORE                              │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐ │
//! │  │  MEDSHIELD   │  │  VAULTBANK   │  │   GRIDCORE   │  │   GLOBAL    │ │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘  └──────┬──────┘ │
//! │         │                 │                 │                 │        │
//! │  ┌──────▼─────────────────▼─────────────────▼─────────────────▼──────┐ │
//! │  │                    TENANT ISOLATION GUARD                         │ │
//! │  │      Path → Tenant | Active Tenant UUID == Target Tenant UUID     │ │
//! │  └───────────────────────────────┬───────────────────────────────────┘ │
//! │                                  │                                      │
//! │  ┌──────────────┐  ┌─────────────▼──────┐  ┌──────────────┐            │
//! │  │    Health    │  │   Primary Store    │  │  DMZ Store   │            │
//! │  │   Scoring    │  │ Risk | Email | Audit│  │ (Quarantine) │            │
//! │  │  (A+ .. F)   │  │  (append-only)     │  │ (isolated)   │            │
//! │  └──────────────┘  └────────────────────┘  └──────────────┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod audit;
pub mod email;
pub mod error;
pub mod health;
pub mod quarantine;
pub mod retention;
pub mod risk_acceptance;
pub mod scoring;
pub mod store;
pub mod tenant;

use chrono::{DateTime, Utc};

pub use audit::{
    AuditActionType, AuditLogInput, AuditLogRecord, AuditLogType, AuditLogger, ExportFormat, PurgeReport,
};
pub use email::{EmailTracker, SendEmailInput, TrackedEmailRecord};
pub use error::{IronframeError, IronframeResult};
pub use health::{calculate_health_score, HealthGrade, HealthScoreInput, HealthScoreResult};
pub use quarantine::{QuarantineLog, QuarantineRecord};
pub use risk_acceptance::{RiskAcceptanceDecision, RiskAcceptanceLog, RiskAcceptanceRequest};
pub use store::{AppendOnlyStore, RecordLog};
pub use tenant::{assert_tenant_access, detect_tenant_from_path, ensure_tenant_access, TenantKey};

/// Primary record stores.
///
/// Constructed explicitly and owned by the host; there are no module-level
/// singletons, so each process or test gets a fresh set.
#[derive(Debug, Default)]
pub struct GrcStores {
    /// Risk acceptance decisions
    pub risk_acceptance: RiskAcceptanceLog,
    /// Outbound email tracking
    pub email: EmailTracker,
    /// Audit trail
    pub audit: AuditLogger,
}

impl GrcStores {
    /// Stores with the default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores sharing one view limit and retention cap
    pub fn with_limits(view_limit: usize, retention: usize) -> Self {
        Self {
            risk_acceptance: RiskAcceptanceLog::with_limits(view_limit, retention),
            email: EmailTracker::with_limits(view_limit, retention),
            audit: AuditLogger::with_limits(view_limit, retention),
        }
    }

    /// Accept the risk on an alert and record the dismissal in the audit trail.
    pub fn accept_risk(
        &self,
        request: RiskAcceptanceRequest,
        ip_address: &str,
        now: DateTime<Utc>,
    ) -> IronframeResult<RiskAcceptanceDecision> {
        let decision = self.risk_acceptance.accept(request, now)?;
        self.audit.append(
            AuditLogInput::new(
                AuditActionType::AlertDismissed,
                format!("Risk accepted for alert {}.", decision.alert_id),
            )
            .ip(ip_address)
            .at(now),
        );
        Ok(decision)
    }

    /// Track an outbound email and record the send in the `APP_SYSTEM` audit log.
    pub fn send_email(&self, input: &SendEmailInput) -> IronframeResult<TrackedEmailRecord> {
        let record = self.email.send_with_tracking(input)?;
        self.audit.append(
            AuditLogInput::new(
                AuditActionType::EmailSent,
                format!("{} -> {} ({})", record.subject, record.recipient_title, record.recipient_email),
            )
            .at(record.sent_time),
        );
        Ok(record)
    }
}
