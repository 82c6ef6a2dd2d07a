//! Application state shared across handlers

use crate::mailer::OrderMailer;
use crate::repositories::{
    coupons::CouponRepository, orders::OrderRepository, products::ProductRepository,
    reviews::ReviewRepository, users::UserRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub product_repository: ProductRepository,
    pub review_repository: ReviewRepository,
    pub order_repository: OrderRepository,
    pub coupon_repository: CouponRepository,
    pub user_repository: UserRepository,
    pub mailer: OrderMailer,
}
