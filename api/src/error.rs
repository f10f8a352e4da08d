//! API error mapping

use crate::models::ApiResponse;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ironframe_core::IronframeError;
use thiserror::Error;

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A domain operation refused the request
    #[error(transparent)]
    Core(#[from] IronframeError),

    /// Request body could not be read as JSON
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Query string could not be parsed
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// No tenant owns the requested path
    #[error("no tenant owns path {0}")]
    TenantNotFound(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Core(IronframeError::Validation(_)) | Self::InvalidBody(_) | Self::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Core(IronframeError::TenantIsolation(_)) => StatusCode::FORBIDDEN,
            Self::Core(IronframeError::UnknownTenant(_)) | Self::TenantNotFound(_) => StatusCode::NOT_FOUND,
            Self::Core(IronframeError::Serialization(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Core(IronframeError::Validation(_)) => "VALIDATION_FAILED",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::Core(IronframeError::TenantIsolation(_)) => "TENANT_ISOLATION",
            Self::Core(IronframeError::UnknownTenant(_)) | Self::TenantNotFound(_) => "UNKNOWN_TENANT",
            Self::Core(IronframeError::Serialization(_)) => "INTERNAL",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Core(IronframeError::Validation(msg)) => msg.clone(),
            Self::Core(IronframeError::TenantIsolation(_)) => "Cross-tenant access denied.".to_string(),
            // Serializer detail stays in the log
            Self::Core(IronframeError::Serialization(_)) => "Internal error.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        let body = ApiResponse::<()>::error(self.code(), &self.message());
        (status, Json(body)).into_response()
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;
