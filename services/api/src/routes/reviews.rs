//! Review handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::{ApiError, ApiResult},
    models::{
        MessageResponse,
        review::{
            CreateReviewRequest, ReviewCreatedResponse, ReviewListResponse, UpdateReviewRequest,
        },
    },
    repositories::reviews::is_duplicate_review,
    state::AppState,
};

/// List a product's reviews joined with reviewer names, newest first. Zero
/// reviews is a success with empty data.
pub async fn list_by_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let reviews = state
        .review_repository
        .list_by_product(product_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reviews for product {}: {}", product_id, e);
            ApiError::database("Lỗi server khi lấy đánh giá", e)
        })?;

    Ok(Json(ReviewListResponse {
        success: true,
        data: reviews,
        message: "Lấy đánh giá thành công".to_string(),
    }))
}

/// Submit a review. The product and the reviewer must exist, and each user
/// gets one review per product; the unique constraint on the pair closes
/// the race the pre-check leaves open.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateReviewRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(product_id), Some(user_id), Some(rating), Some(comment)) = (
        payload.product_id,
        payload.user_id,
        payload.rating,
        payload.comment.filter(|c| !c.is_empty()),
    ) else {
        return Err(ApiError::validation(
            "Thiếu thông tin cần thiết để gửi đánh giá",
        ));
    };

    let product_found = state
        .product_repository
        .exists(product_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check product {}: {}", product_id, e);
            ApiError::database("Lỗi server khi kiểm tra sản phẩm", e)
        })?;
    if !product_found {
        return Err(ApiError::not_found("Sản phẩm không tồn tại"));
    }

    let user_found = state.user_repository.exists(user_id).await.map_err(|e| {
        tracing::error!("Failed to check user {}: {}", user_id, e);
        ApiError::database("Lỗi server khi kiểm tra người dùng", e)
    })?;
    if !user_found {
        return Err(ApiError::not_found("Người dùng không tồn tại"));
    }

    let already_reviewed = state
        .review_repository
        .exists_for_pair(product_id, user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check existing review: {}", e);
            ApiError::database("Lỗi server khi kiểm tra đánh giá hiện có", e)
        })?;
    if already_reviewed {
        return Err(ApiError::conflict("Bạn đã đánh giá sản phẩm này rồi"));
    }

    let review_id = match state
        .review_repository
        .create(product_id, user_id, rating, &comment)
        .await
    {
        Ok(id) => id,
        Err(e) if is_duplicate_review(&e) => {
            return Err(ApiError::conflict("Bạn đã đánh giá sản phẩm này rồi"));
        }
        Err(e) => {
            tracing::error!("Failed to insert review: {}", e);
            return Err(ApiError::database("Lỗi server khi thêm đánh giá", e));
        }
    };

    let review = state
        .review_repository
        .get_with_author(review_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch new review {}: {}", review_id, e);
            ApiError::database("Lỗi server khi lấy thông tin đánh giá mới", e)
        })?
        .ok_or_else(|| ApiError::not_found("Không tìm thấy đánh giá"))?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewCreatedResponse {
            message: "Đánh giá đã được gửi thành công".to_string(),
            review,
        }),
    ))
}

/// Overwrite a review's rating and comment
pub async fn update(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
    Json(payload): Json<UpdateReviewRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(rating), Some(comment)) =
        (payload.rating, payload.comment.filter(|c| !c.is_empty()))
    else {
        return Err(ApiError::validation("Thiếu thông tin đánh giá"));
    };

    let rows = state
        .review_repository
        .update(review_id, rating, &comment)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update review {}: {}", review_id, e);
            ApiError::database("Lỗi server khi cập nhật đánh giá", e)
        })?;

    if rows == 0 {
        return Err(ApiError::not_found("Không tìm thấy đánh giá"));
    }

    Ok(Json(MessageResponse::new(
        "Đánh giá đã được cập nhật thành công",
    )))
}

/// Delete a review
pub async fn remove(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let rows = state
        .review_repository
        .delete(review_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete review {}: {}", review_id, e);
            ApiError::database("Lỗi server khi xóa đánh giá", e)
        })?;

    if rows == 0 {
        return Err(ApiError::not_found("Không tìm thấy đánh giá"));
    }

    Ok(Json(MessageResponse::new(
        "Đánh giá đã được xóa thành công",
    )))
}
