//! Product catalog handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::{ApiError, ApiResult},
    models::{MessageResponse, product::ProductPayload},
    state::AppState,
};

/// List the whole catalog
pub async fn list(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let products = state.product_repository.get_all().await.map_err(|e| {
        tracing::error!("Failed to list products: {}", e);
        ApiError::database("Lỗi khi lấy danh sách sản phẩm", e)
    })?;

    Ok(Json(products))
}

/// Create a product; every field is required, zero price and stock allowed
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> ApiResult<impl IntoResponse> {
    let Some(input) = payload.into_input() else {
        return Err(ApiError::validation(
            "Vui lòng cung cấp đầy đủ thông tin sản phẩm.",
        ));
    };

    state.product_repository.create(&input).await.map_err(|e| {
        tracing::error!("Failed to create product: {}", e);
        ApiError::database(
            "Đã xảy ra lỗi trong quá trình thêm sản phẩm. Vui lòng thử lại sau.",
            e,
        )
    })?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Sản phẩm đã được thêm thành công.")),
    ))
}

/// Overwrite a product by identifier. A non-existent identifier still
/// reports success; nothing checks the matched row count here.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> ApiResult<impl IntoResponse> {
    let Some(input) = payload.into_input() else {
        return Err(ApiError::validation(
            "Vui lòng cung cấp đầy đủ thông tin sản phẩm.",
        ));
    };

    state
        .product_repository
        .update(id, &input)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update product {}: {}", id, e);
            ApiError::database("Lỗi khi cập nhật sản phẩm", e)
        })?;

    Ok(Json(MessageResponse::new("Sản phẩm đã được cập nhật")))
}

/// Delete a product by identifier
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    state.product_repository.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete product {}: {}", id, e);
        ApiError::database("Lỗi khi xóa sản phẩm", e)
    })?;

    Ok(Json(MessageResponse::new("Sản phẩm đã được xóa")))
}
