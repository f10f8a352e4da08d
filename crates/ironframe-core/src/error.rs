//! Error types for Ironframe

use thiserror::Error;

/// Ironframe error type
#[derive(Error, Debug)]
pub enum IronframeError {
    /// A caller-supplied field required by the operation is missing or blank
    #[error("validation failed: {0}")]
    Validation(String),

    /// The active tenant may not touch the target tenant's data
    #[error("tenant isolation violation: {0}")]
    TenantIsolation(String),

    /// Tenant code or UUID outside the fixed tenant set
    #[error("unknown tenant: {0}")]
    UnknownTenant(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IronframeError {
    /// Shorthand for a missing required field.
    pub fn required(field: &str) -> Self {
        Self::Validation(format!("{field} is required."))
    }
}

/// Result type for Ironframe
pub type IronframeResult<T> = Result<T, IronframeError>;
