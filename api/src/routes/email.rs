//! Tracked email endpoints

use crate::error::ApiResult;
use crate::{models::*, ApiState};
use axum::extract::{rejection::JsonRejection, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use ironframe_core::{SendEmailInput, TrackedEmailRecord};
use std::sync::Arc;

/// Routes nested under `/api/email`
pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/send", post(send_email))
        .route("/tracking", get(list_tracked_email))
}

/// Send an email with read tracking
#[utoipa::path(
    post,
    path = "/api/email/send",
    request_body = SendEmailInput,
    responses(
        (status = 200, description = "Email tracked", body = TrackedEmailRecord),
        (status = 400, description = "recipientEmail missing", body = ErrorResponse)
    ),
    tag = "email"
)]
pub async fn send_email(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<SendEmailInput>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<TrackedEmailRecord>>> {
    let Json(input) = payload?;
    Ok(Json(ApiResponse::success(state.stores.send_email(&input)?)))
}

/// List tracked email, most recent first
#[utoipa::path(
    get,
    path = "/api/email/tracking",
    responses(
        (status = 200, description = "Up to 200 tracked emails", body = Vec<TrackedEmailRecord>)
    ),
    tag = "email"
)]
pub async fn list_tracked_email(State(state): State<Arc<ApiState>>) -> Json<ApiResponse<Vec<TrackedEmailRecord>>> {
    Json(ApiResponse::success(state.stores.email.list()))
}
