//! Tenant Isolation Guard
//!
//! The tenant set is closed: every [`TenantKey`] maps to exactly one UUID and
//! the table never changes at runtime.

use crate::error::{IronframeError, IronframeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::{uuid, Uuid};

/// Tenant organization with its own data partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum TenantKey {
    /// Healthcare
    Medshield,
    /// Finance
    Vaultbank,
    /// Energy
    Gridcore,
}

impl TenantKey {
    /// Every tenant, in path-matching order
    pub const ALL: [TenantKey; 3] = [TenantKey::Medshield, TenantKey::Vaultbank, TenantKey::Gridcore];

    /// Short tenant code used in URLs
    pub const fn code(self) -> &'static str {
        match self {
            TenantKey::Medshield => "medshield",
            TenantKey::Vaultbank => "vaultbank",
            TenantKey::Gridcore => "gridcore",
        }
    }

    /// Stable tenant UUID
    pub const fn uuid(self) -> Uuid {
        match self {
            TenantKey::Medshield => uuid!("5c420f5a-8f1f-4bbf-b42d-7f8dd4bb6a01"),
            TenantKey::Vaultbank => uuid!("c6932d16-a716-4a07-9bc4-6ec987f641e2"),
            TenantKey::Gridcore => uuid!("4d1ea1a4-b6a8-4d12-9eb3-2f0a64ad0ef7"),
        }
    }

    /// Upper-case display label, e.g. `MEDSHIELD`
    pub const fn label(self) -> &'static str {
        match self {
            TenantKey::Medshield => "MEDSHIELD",
            TenantKey::Vaultbank => "VAULTBANK",
            TenantKey::Gridcore => "GRIDCORE",
        }
    }

    /// Route prefix owned by the tenant, e.g. `/medshield`
    pub const fn route_prefix(self) -> &'static str {
        match self {
            TenantKey::Medshield => "/medshield",
            TenantKey::Vaultbank => "/vaultbank",
            TenantKey::Gridcore => "/gridcore",
        }
    }

    /// Reverse lookup from the hyphenated UUID string
    pub fn from_uuid(value: &str) -> Option<Self> {
        let parsed = Uuid::parse_str(value).ok()?;
        Self::ALL.into_iter().find(|tenant| tenant.uuid() == parsed)
    }

    fn owns_path(self, pathname: &str) -> bool {
        pathname
            .strip_prefix(self.route_prefix())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

impl fmt::Display for TenantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TenantKey {
    type Err = IronframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tenant| tenant.code() == s)
            .ok_or_else(|| IronframeError::UnknownTenant(s.to_string()))
    }
}

/// Map a request path to the tenant whose pane it addresses.
///
/// A tenant matches on its exact prefix or the prefix followed by `/`, so
/// `/medshield/logs` matches but `/medshieldx` does not.
pub fn detect_tenant_from_path(pathname: &str) -> Option<TenantKey> {
    TenantKey::ALL.into_iter().find(|tenant| tenant.owns_path(pathname))
}

/// Decide whether the active tenant may access the target tenant's resource.
///
/// Fails open: an absent (or empty) active tenant is the unauthenticated or
/// system context and is always allowed. Otherwise the UUID strings must be
/// byte-for-byte equal; no case folding is applied.
pub fn assert_tenant_access(active_tenant_uuid: Option<&str>, target_tenant_uuid: &str) -> bool {
    match active_tenant_uuid {
        None | Some("") => true,
        Some(active) => active == target_tenant_uuid,
    }
}

/// [`assert_tenant_access`] for callers that must refuse a cross-tenant read.
pub fn ensure_tenant_access(active_tenant_uuid: Option<&str>, target: TenantKey) -> IronframeResult<()> {
    let target_uuid = target.uuid().to_string();
    if assert_tenant_access(active_tenant_uuid, &target_uuid) {
        return Ok(());
    }

    tracing::warn!(
        active = active_tenant_uuid.unwrap_or_default(),
        target = %target,
        "Blocked cross-tenant access"
    );
    Err(IronframeError::TenantIsolation(format!(
        "active tenant may not access {}",
        target.label()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEDSHIELD: &str = "5c420f5a-8f1f-4bbf-b42d-7f8dd4bb6a01";
    const VAULTBANK: &str = "c6932d16-a716-4a07-9bc4-6ec987f641e2";

    #[test]
    fn test_detects_tenant_prefixes() {
        assert_eq!(detect_tenant_from_path("/medshield/logs"), Some(TenantKey::Medshield));
        assert_eq!(detect_tenant_from_path("/medshield"), Some(TenantKey::Medshield));
        assert_eq!(detect_tenant_from_path("/vaultbank/"), Some(TenantKey::Vaultbank));
        assert_eq!(detect_tenant_from_path("/gridcore/topology"), Some(TenantKey::Gridcore));
    }

    #[test]
    fn test_rejects_near_misses() {
        assert_eq!(detect_tenant_from_path("/unknown"), None);
        assert_eq!(detect_tenant_from_path("/medshieldx"), None);
        assert_eq!(detect_tenant_from_path("medshield"), None);
        assert_eq!(detect_tenant_from_path("/api/medshield/assets"), None);
        assert_eq!(detect_tenant_from_path(""), None);
    }

    #[test]
    fn test_access_fails_open_without_active_tenant() {
        assert!(assert_tenant_access(None, "any-uuid"));
        assert!(assert_tenant_access(Some(""), "any-uuid"));
    }

    #[test]
    fn test_access_requires_exact_match() {
        assert!(assert_tenant_access(Some("X"), "X"));
        assert!(!assert_tenant_access(Some("X"), "Y"));
        assert!(!assert_tenant_access(Some(&MEDSHIELD.to_uppercase()), MEDSHIELD));
    }

    #[test]
    fn test_uuid_table_round_trips() {
        assert_eq!(TenantKey::Medshield.uuid().to_string(), MEDSHIELD);
        assert_eq!(TenantKey::from_uuid(VAULTBANK), Some(TenantKey::Vaultbank));
        assert_eq!(TenantKey::from_uuid("not-a-uuid"), None);
        for tenant in TenantKey::ALL {
            assert_eq!(TenantKey::from_uuid(&tenant.uuid().to_string()), Some(tenant));
            assert_eq!(tenant.code().parse::<TenantKey>().unwrap(), tenant);
        }
    }

    #[test]
    fn test_ensure_access_reports_violation() {
        assert!(ensure_tenant_access(Some(MEDSHIELD), TenantKey::Medshield).is_ok());
        assert!(ensure_tenant_access(None, TenantKey::Gridcore).is_ok());

        let err = ensure_tenant_access(Some(MEDSHIELD), TenantKey::Vaultbank).unwrap_err();
        assert!(matches!(err, IronframeError::TenantIsolation(_)));
    }

    #[test]
    fn test_unknown_code_fails_to_parse() {
        let err = "acme".parse::<TenantKey>().unwrap_err();
        assert!(matches!(err, IronframeError::UnknownTenant(code) if code == "acme"));
    }
}
