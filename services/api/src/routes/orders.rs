//! Order lifecycle handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::{ApiError, ApiResult},
    models::{
        MessageResponse, StatusResponse,
        order::{
            CreateOrderRequest, OrderChanges, OrderCreatedResponse, OrderStatus,
            SendConfirmationRequest, UpdateOrderRequest, status_label,
        },
    },
    repositories::orders::{CreateOrderError, DeleteOrderError},
    state::AppState,
};

/// List all orders, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let orders = state.order_repository.get_all().await.map_err(|e| {
        tracing::error!("Failed to list orders: {}", e);
        ApiError::database("Không thể tải danh sách đơn hàng", e)
    })?;

    Ok(Json(orders))
}

/// A customer's order history with display-language status labels
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let orders = state
        .order_repository
        .get_by_user(user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list orders for user {}: {}", user_id, e);
            ApiError::database("Lỗi khi lấy dữ liệu đơn hàng", e)
        })?;

    let orders: Vec<_> = orders
        .into_iter()
        .map(|mut order| {
            order.status = status_label(&order.status).to_string();
            order
        })
        .collect();

    Ok(Json(orders))
}

/// Place an order: header and line items in one transaction, status fixed
/// to pending. Amounts are stored as submitted by the client.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> ApiResult<impl IntoResponse> {
    let Some(order) = payload.into_new_order() else {
        return Err(ApiError::validation(
            "Thiếu thông tin đơn hàng hoặc thông tin không hợp lệ",
        ));
    };

    let order_id = state.order_repository.create(&order).await.map_err(|e| {
        tracing::error!("Order creation failed: {}", e);
        let message = match &e {
            CreateOrderError::Begin(_) => "Lỗi khởi tạo giao dịch",
            CreateOrderError::Header(_) => "Lỗi tạo đơn hàng",
            CreateOrderError::Items(_) => "Lỗi thêm chi tiết đơn hàng",
            CreateOrderError::Commit(_) => "Lỗi hoàn tất giao dịch",
        };
        ApiError::database(message, e)
    })?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreatedResponse {
            success: true,
            message: "Đặt hàng thành công".to_string(),
            order_id,
        }),
    ))
}

/// Full overwrite of an order's mutable fields; the status must be one of
/// the five lifecycle codes
pub async fn update(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Json(payload): Json<UpdateOrderRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(total_amount), Some(shipping_address), Some(payment_method), Some(order_status)) = (
        payload.total_amount,
        payload.shipping_address.filter(|s| !s.is_empty()),
        payload.payment_method.filter(|s| !s.is_empty()),
        payload.order_status.filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::validation("Thông tin đơn hàng không đầy đủ"));
    };

    let Some(status) = OrderStatus::parse(&order_status) else {
        return Err(ApiError::validation("Trạng thái đơn hàng không hợp lệ"));
    };

    let changes = OrderChanges {
        total_amount,
        shipping_address,
        payment_method,
        status,
    };

    let rows = state
        .order_repository
        .update(order_id, &changes)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update order {}: {}", order_id, e);
            ApiError::database("Lỗi khi cập nhật đơn hàng", e)
        })?;

    if rows == 0 {
        return Err(ApiError::not_found("Không tìm thấy đơn hàng"));
    }

    Ok(Json(MessageResponse::new("Đơn hàng đã được cập nhật")))
}

/// Delete an order together with its line items
pub async fn remove(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state.order_repository.delete(order_id).await.map_err(|e| {
        tracing::error!("Failed to delete order {}: {}", order_id, e);
        let message = match &e {
            DeleteOrderError::Items(_) => "Lỗi khi xóa chi tiết đơn hàng",
            DeleteOrderError::Begin(_)
            | DeleteOrderError::Header(_)
            | DeleteOrderError::Commit(_) => "Lỗi khi xóa đơn hàng",
        };
        ApiError::database(message, e)
    })?;

    if !deleted {
        return Err(ApiError::not_found("Không tìm thấy đơn hàng"));
    }

    Ok(Json(MessageResponse::new(
        "Đơn hàng và chi tiết đã được xóa thành công",
    )))
}

/// Dispatch the order confirmation mail; failures end the request, nothing
/// is retried
pub async fn send_confirmation(
    State(state): State<AppState>,
    Json(payload): Json<SendConfirmationRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(order_id), Some(email), Some(details)) = (
        payload.order_id,
        payload.email.filter(|e| !e.is_empty()),
        payload.order_details,
    ) else {
        return Err(ApiError::validation(
            "Thiếu thông tin gửi xác nhận đơn hàng",
        ));
    };

    state
        .mailer
        .send_order_confirmation(&email, order_id, &details)
        .await
        .map_err(|e| {
            tracing::error!("Failed to send confirmation for order {}: {}", order_id, e);
            ApiError::mail("Lỗi gửi email xác nhận", e)
        })?;

    Ok(Json(StatusResponse {
        success: true,
        message: "Đã gửi email xác nhận".to_string(),
    }))
}
