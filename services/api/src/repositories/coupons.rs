//! Coupon repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};

use crate::models::coupon::Coupon;

/// Coupon repository; coupons are validated, never mutated
#[derive(Clone)]
pub struct CouponRepository {
    pool: PgPool,
}

impl CouponRepository {
    /// Create a new coupon repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up an active, unexpired coupon by exact code
    pub async fn find_active(&self, code: &str) -> Result<Option<Coupon>> {
        let row = sqlx::query(
            r#"
            SELECT id, code, discount_amount, discount_percent, max_discount
            FROM coupons
            WHERE code = $1
              AND is_active = TRUE
              AND (expires_at IS NULL OR expires_at > now())
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Coupon {
                id: row.get("id"),
                code: row.get("code"),
                discount_amount: row.get("discount_amount"),
                discount_percent: row.get("discount_percent"),
                max_discount: row.get("max_discount"),
            })),
            None => Ok(None),
        }
    }
}
