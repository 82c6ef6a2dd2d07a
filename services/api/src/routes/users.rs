//! User management handlers

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    error::{ApiError, ApiResult},
    models::{
        MessageResponse,
        user::{LoginRequest, LoginResponse, RegisterRequest, UpdateUserRequest},
    },
    state::AppState,
    validation,
};

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let Some(new_user) = payload.into_new_user() else {
        return Err(ApiError::validation(
            "Vui lòng cung cấp đầy đủ thông tin đăng ký",
        ));
    };

    if let Err(message) = validation::validate_email(&new_user.email) {
        return Err(ApiError::validation(message));
    }

    state.user_repository.create(&new_user).await.map_err(|e| {
        tracing::error!("Failed to register user: {}", e);
        ApiError::database("Đăng ký thất bại", e)
    })?;

    Ok(Json(MessageResponse::new("Đăng ký thành công")))
}

/// Log a user in by email and password; the response carries the public
/// fields and the admin flag, never the stored hash
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(email), Some(password)) = (
        payload.email.filter(|e| !e.is_empty()),
        payload.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::validation("Thiếu email hoặc mật khẩu"));
    };

    let user = state
        .user_repository
        .find_by_email(&email)
        .await
        .map_err(|e| {
            tracing::error!("Login lookup failed: {}", e);
            ApiError::database("Đăng nhập thất bại", e)
        })?
        .ok_or_else(|| ApiError::unauthorized("Sai tài khoản hoặc mật khẩu"))?;

    let verified = state
        .user_repository
        .verify_password(&user, &password)
        .map_err(|e| {
            tracing::error!("Password verification failed: {}", e);
            ApiError::database("Đăng nhập thất bại", e)
        })?;

    if !verified {
        return Err(ApiError::unauthorized("Sai tài khoản hoặc mật khẩu"));
    }

    Ok(Json(LoginResponse {
        message: "Đăng nhập thành công".to_string(),
        user: user.into(),
    }))
}

/// List all users for the admin screen
pub async fn list(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let users = state.user_repository.get_all().await.map_err(|e| {
        tracing::error!("Failed to list users: {}", e);
        ApiError::database("Lỗi khi truy vấn dữ liệu", e)
    })?;

    Ok(Json(users))
}

/// Full overwrite of a user; omitted fields become NULL and a missing admin
/// flag falls back to false
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let rows = state
        .user_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user {}: {}", id, e);
            ApiError::database("Lỗi khi cập nhật người dùng", e)
        })?;

    if rows == 0 {
        return Err(ApiError::not_found("Người dùng không tồn tại"));
    }

    Ok(Json(MessageResponse::new("Người dùng đã được cập nhật")))
}

/// Delete a user by identifier
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    state.user_repository.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete user {}: {}", id, e);
        ApiError::database("Lỗi khi xóa người dùng", e)
    })?;

    Ok(Json(MessageResponse::new("Người dùng đã được xóa")))
}
