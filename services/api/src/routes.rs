//! Storefront API routes

use axum::{
    Json, Router,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;

use crate::state::AppState;

pub mod coupons;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;

/// Create the router for the storefront API
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:id",
            put(products::update).delete(products::remove),
        )
        .route("/reviews", post(reviews::create))
        .route(
            "/reviews/:id",
            get(reviews::list_by_product)
                .put(reviews::update)
                .delete(reviews::remove),
        )
        .route("/orders", get(orders::list).post(orders::create))
        .route("/orders/send-confirmation", post(orders::send_confirmation))
        .route(
            "/orders/:id",
            get(orders::list_by_user)
                .put(orders::update)
                .delete(orders::remove),
        )
        .route("/coupons/validate", post(coupons::validate))
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/users", get(users::list))
        .route("/users/:id", put(users::update).delete(users::remove))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "storefront-api"
    }))
}
