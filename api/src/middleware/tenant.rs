//! Tenant isolation guard
//!
//! Every tenant pane request is attributed to the tenant owning its path.
//! When the caller names an active tenant in `x-tenant-id`, it must be that
//! tenant.

use crate::error::ApiError;
use axum::extract::{OriginalUri, Request};
use axum::middleware::Next;
use axum::response::Response;
use ironframe_core::{detect_tenant_from_path, ensure_tenant_access, IronframeError};

/// Header carrying the active tenant UUID
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Resolve the tenant from the path, enforce isolation and hand the
/// resolved [`ironframe_core::TenantKey`] to the handler as an extension.
pub async fn tenant_guard(
    OriginalUri(uri): OriginalUri,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // nested routers see a stripped path, so match on the original
    let tenant = detect_tenant_from_path(uri.path())
        .ok_or_else(|| ApiError::TenantNotFound(uri.path().to_string()))?;

    let active = match request.headers().get(TENANT_HEADER) {
        Some(value) => Some(value.to_str().map_err(|_| {
            IronframeError::TenantIsolation(format!("{TENANT_HEADER} is not valid text"))
        })?),
        None => None,
    };
    ensure_tenant_access(active, tenant)?;

    request.extensions_mut().insert(tenant);
    Ok(next.run(request).await)
}
