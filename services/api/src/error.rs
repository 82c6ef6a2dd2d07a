//! Custom error types for the storefront API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::env;
use thiserror::Error;

use crate::mailer::MailError;

/// Custom error type for the storefront API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Referenced entity absent or zero rows affected
    #[error("{0}")]
    NotFound(String),

    /// Duplicate review for a (product, user) pair
    #[error("{0}")]
    Conflict(String),

    /// Login mismatch
    #[error("{0}")]
    Unauthorized(String),

    /// Driver, connection, or query failure
    #[error("{message}")]
    Database {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// Confirmation mail could not be dispatched
    #[error("{message}")]
    Mail {
        message: String,
        #[source]
        source: MailError,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn database(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Database {
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn mail(message: impl Into<String>, source: MailError) -> Self {
        Self::Mail {
            message: message.into(),
            source,
        }
    }

    /// Driver-level detail, only exposed in development mode
    fn detail(&self) -> Option<String> {
        match self {
            Self::Database { source, .. } => Some(format!("{:#}", source)),
            Self::Mail { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }
}

/// Whether error responses should carry driver detail
fn error_detail_enabled() -> bool {
    env::var("APP_ENV").is_ok_and(|v| v == "development")
}

/// Whether a database failure was a refused connection rather than a bad
/// query
fn is_connection_refused(source: &anyhow::Error) -> bool {
    source.chain().any(|cause| {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            return io.kind() == std::io::ErrorKind::ConnectionRefused;
        }
        matches!(
            cause.downcast_ref::<sqlx::Error>(),
            Some(sqlx::Error::PoolTimedOut)
        )
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::Database { message, source } => {
                if is_connection_refused(source) {
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Không thể kết nối đến database".to_string(),
                    )
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
                }
            }
            ApiError::Mail { message, .. } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        let mut body = json!({
            "success": false,
            "message": message,
        });

        if error_detail_enabled() {
            if let Some(detail) = self.detail() {
                body["error"] = json!(detail);
            }
        }

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let response = ApiError::validation("thiếu thông tin").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError::not_found("không tìm thấy").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflict_maps_to_409() {
        let response = ApiError::conflict("đã tồn tại").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let response = ApiError::unauthorized("sai mật khẩu").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn query_failure_maps_to_500() {
        let err = ApiError::database("lỗi truy vấn", anyhow::anyhow!("boom"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn connection_refused_maps_to_503() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ApiError::database("lỗi truy vấn", anyhow::Error::from(io));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
