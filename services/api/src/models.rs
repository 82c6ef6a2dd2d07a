//! API models for request and response payloads

use serde::Serialize;

pub mod coupon;
pub mod order;
pub mod product;
pub mod review;
pub mod user;

/// Plain confirmation payload returned by mutating endpoints
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Confirmation payload with an explicit success flag
#[derive(Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}
