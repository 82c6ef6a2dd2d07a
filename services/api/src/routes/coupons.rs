//! Coupon validation handler

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    error::{ApiError, ApiResult},
    models::coupon::{CouponInfo, CouponValidateResponse, ValidateCouponRequest},
    state::AppState,
};

/// Validate a coupon code against a cart total. Read-only: usage counts and
/// expiry are never mutated here.
pub async fn validate(
    State(state): State<AppState>,
    Json(payload): Json<ValidateCouponRequest>,
) -> ApiResult<impl IntoResponse> {
    let Some(code) = payload.code.filter(|c| !c.is_empty()) else {
        return Err(ApiError::validation("Mã giảm giá không được để trống"));
    };

    let Some(total) = payload.total else {
        return Err(ApiError::validation("Tổng tiền không được để trống"));
    };

    let coupon = state
        .coupon_repository
        .find_active(&code)
        .await
        .map_err(|e| {
            tracing::error!("Failed to validate coupon {}: {}", code, e);
            ApiError::database("Lỗi hệ thống", e)
        })?
        .ok_or_else(|| ApiError::not_found("Mã giảm giá không hợp lệ hoặc đã hết hạn"))?;

    let discount_amount = coupon.discount_for(total);

    Ok(Json(CouponValidateResponse {
        success: true,
        coupon: CouponInfo {
            id: coupon.id,
            code: coupon.code,
            discount_amount,
            discount_percent: coupon.discount_percent,
            max_discount: coupon.max_discount,
        },
    }))
}
