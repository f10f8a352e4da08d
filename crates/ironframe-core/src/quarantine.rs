//! Document Quarantine (DMZ)
//!
//! Unvetted uploads land here pending review. The quarantine log is a
//! separate store from the primary records so a compromised upload can never
//! be read back through the audit or vendor panes.

use crate::error::{IronframeError, IronframeResult};
use crate::store::RecordLog;
use crate::tenant::TenantKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage prefix for files awaiting review
pub const PENDING_STORAGE_PATH: &str = "pending/";
/// Uploader recorded for automated intake
pub const SYSTEM_UPLOADER: &str = "SYSTEM";

/// Review state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuarantineStatus {
    /// Awaiting review
    Pending,
}

/// Quarantined file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct QuarantineRecord {
    pub id: Uuid,
    pub file_name: String,
    /// Tenant the upload belongs to
    pub tenant: TenantKey,
    pub status: QuarantineStatus,
    /// Size in bytes
    pub file_size: u64,
    /// Storage prefix, always [`PENDING_STORAGE_PATH`]
    pub storage_path: String,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}

/// Quarantine intake request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct QuarantineRequest {
    /// Required, must not be blank
    pub file_name: Option<String>,
    /// Size in bytes, 0 when absent
    #[serde(default)]
    pub file_size: u64,
}

/// DMZ quarantine log
#[derive(Debug, Default)]
pub struct QuarantineLog {
    log: RecordLog<QuarantineRecord>,
}

impl QuarantineLog {
    /// Log with the default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Log with explicit limits
    pub fn with_limits(view_limit: usize, retention: usize) -> Self {
        Self { log: RecordLog::with_limits(view_limit, retention) }
    }

    /// Record a file as pending review. Tenant defaults to medshield.
    pub fn quarantine(
        &self,
        file_name: &str,
        tenant: Option<TenantKey>,
        file_size: u64,
    ) -> IronframeResult<QuarantineRecord> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(IronframeError::required("fileName"));
        }

        let record = QuarantineRecord {
            id: Uuid::new_v4(),
            file_name: file_name.to_string(),
            tenant: tenant.unwrap_or(TenantKey::Medshield),
            status: QuarantineStatus::Pending,
            file_size,
            storage_path: PENDING_STORAGE_PATH.to_string(),
            uploaded_by: SYSTEM_UPLOADER.to_string(),
            created_at: Utc::now(),
        };

        tracing::info!(id = %record.id, tenant = %record.tenant, file = %record.file_name, "File quarantined");
        self.log.append(record.clone());
        Ok(record)
    }

    /// Most recent records first, at most the view limit
    pub fn list(&self) -> Vec<QuarantineRecord> {
        self.log.list()
    }

    /// One tenant's most recent records, at most the view limit. Other
    /// tenants' uploads never crowd a tenant out of its own view.
    pub fn list_for(&self, tenant: TenantKey) -> Vec<QuarantineRecord> {
        self.log.list_where(|r| r.tenant == tenant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarantine_defaults() {
        let dmz = QuarantineLog::new();
        let record = dmz.quarantine("soc2-report.pdf", None, 0).unwrap();

        assert_eq!(record.tenant, TenantKey::Medshield);
        assert_eq!(record.status, QuarantineStatus::Pending);
        assert_eq!(record.storage_path, PENDING_STORAGE_PATH);
        assert_eq!(record.uploaded_by, SYSTEM_UPLOADER);
    }

    #[test]
    fn test_blank_file_name_rejected() {
        let dmz = QuarantineLog::new();
        let err = dmz.quarantine("   ", Some(TenantKey::Gridcore), 10).unwrap_err();
        assert!(matches!(err, IronframeError::Validation(msg) if msg == "fileName is required."));
        assert!(dmz.list().is_empty());
    }

    #[test]
    fn test_list_for_tenant() {
        let dmz = QuarantineLog::new();
        dmz.quarantine("a.pdf", Some(TenantKey::Vaultbank), 1).unwrap();
        dmz.quarantine("b.pdf", Some(TenantKey::Gridcore), 2).unwrap();
        dmz.quarantine("c.pdf", Some(TenantKey::Vaultbank), 3).unwrap();

        let names: Vec<_> = dmz.list_for(TenantKey::Vaultbank).into_iter().map(|r| r.file_name).collect();
        assert_eq!(names, vec!["c.pdf", "a.pdf"]);
        assert_eq!(dmz.list().len(), 3);
    }

    #[test]
    fn test_list_for_reaches_past_global_view() {
        let dmz = QuarantineLog::with_limits(2, 100);
        dmz.quarantine("chart.pdf", Some(TenantKey::Medshield), 1).unwrap();
        dmz.quarantine("scada-1.pdf", Some(TenantKey::Gridcore), 2).unwrap();
        dmz.quarantine("scada-2.pdf", Some(TenantKey::Gridcore), 3).unwrap();

        assert!(dmz.list().iter().all(|r| r.tenant == TenantKey::Gridcore));
        let medshield: Vec<_> = dmz.list_for(TenantKey::Medshield).into_iter().map(|r| r.file_name).collect();
        assert_eq!(medshield, vec!["chart.pdf"]);
        assert_eq!(dmz.list_for(TenantKey::Gridcore).len(), 2);
    }
}
