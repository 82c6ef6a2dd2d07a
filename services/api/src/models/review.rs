//! Review models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review joined with the reviewer's name
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithAuthor {
    pub id: i64,
    pub product_id: i64,
    pub user_id: i64,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub user_name: Option<String>,
}

/// Payload for submitting a review
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub product_id: Option<i64>,
    pub user_id: Option<i64>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

/// Payload for updating a review's rating and comment
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

/// Listing envelope; zero reviews is a success with empty data
#[derive(Serialize)]
pub struct ReviewListResponse {
    pub success: bool,
    pub data: Vec<ReviewWithAuthor>,
    pub message: String,
}

/// Confirmation returned after a review is stored
#[derive(Serialize)]
pub struct ReviewCreatedResponse {
    pub message: String,
    pub review: ReviewWithAuthor,
}
