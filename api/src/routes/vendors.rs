//! Vendor risk endpoints

use crate::error::ApiResult;
use crate::models::{ApiResponse, ErrorResponse};
use axum::{extract::rejection::JsonRejection, Json};
use ironframe_core::scoring::{
    assess_vendor_questionnaire, calculate_vendor_grade, VendorHealthInput, VendorHealthScore, VendorQuestionnaireInput,
    VendorQuestionnaireResult,
};

/// Score a vendor questionnaire against its industry's risk profile
#[utoipa::path(
    post,
    path = "/api/vendors/assessment",
    request_body = VendorQuestionnaireInput,
    responses(
        (status = 200, description = "Vendor scorecard", body = VendorQuestionnaireResult),
        (status = 400, description = "Malformed questionnaire", body = ErrorResponse)
    ),
    tag = "vendors"
)]
pub async fn assess_vendor(
    payload: Result<Json<VendorQuestionnaireInput>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<VendorQuestionnaireResult>>> {
    let Json(input) = payload?;
    let result = assess_vendor_questionnaire(&input);
    tracing::info!(vendor = %result.vendor_name, score = result.score, "Vendor assessed");
    Ok(Json(ApiResponse::success(result)))
}

/// Grade a vendor's health from its evidence locker and alert state
#[utoipa::path(
    post,
    path = "/api/vendors/health-grade",
    request_body = VendorHealthInput,
    responses(
        (status = 200, description = "Score, grade and penalty breakdown", body = VendorHealthScore),
        (status = 400, description = "Malformed input", body = ErrorResponse)
    ),
    tag = "vendors"
)]
pub async fn grade_vendor_health(
    payload: Result<Json<VendorHealthInput>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<VendorHealthScore>>> {
    let Json(input) = payload?;
    Ok(Json(ApiResponse::success(calculate_vendor_grade(&input))))
}
