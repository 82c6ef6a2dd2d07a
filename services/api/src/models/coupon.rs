//! Coupon models and discount computation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Coupon as loaded for validation; read-only from this service
#[derive(Debug, Clone)]
pub struct Coupon {
    pub id: i64,
    pub code: String,
    pub discount_amount: Decimal,
    pub discount_percent: Decimal,
    pub max_discount: Option<Decimal>,
}

impl Coupon {
    /// Compute the discount for a cart total. A positive percentage wins and
    /// is capped at `max_discount`; otherwise a positive fixed amount
    /// applies; otherwise the discount is zero.
    pub fn discount_for(&self, total: Decimal) -> Decimal {
        if self.discount_percent > Decimal::ZERO {
            let discount = total * self.discount_percent / Decimal::from(100);
            match self.max_discount {
                Some(cap) if discount > cap => cap,
                _ => discount,
            }
        } else if self.discount_amount > Decimal::ZERO {
            self.discount_amount
        } else {
            Decimal::ZERO
        }
    }
}

/// Payload for validating a coupon against a cart total
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateCouponRequest {
    pub code: Option<String>,
    pub total: Option<Decimal>,
}

/// Wire shape for a validated coupon; `discount_amount` carries the discount
/// computed for the submitted total
#[derive(Debug, Clone, Serialize)]
pub struct CouponInfo {
    pub id: i64,
    pub code: String,
    pub discount_amount: Decimal,
    pub discount_percent: Decimal,
    pub max_discount: Option<Decimal>,
}

/// Envelope for a successful coupon validation
#[derive(Serialize)]
pub struct CouponValidateResponse {
    pub success: bool,
    pub coupon: CouponInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percent_coupon() -> Coupon {
        Coupon {
            id: 1,
            code: "SALE10".to_string(),
            discount_amount: Decimal::ZERO,
            discount_percent: Decimal::from(10),
            max_discount: Some(Decimal::from(50)),
        }
    }

    #[test]
    fn percent_discount_is_capped() {
        let coupon = percent_coupon();
        assert_eq!(
            coupon.discount_for(Decimal::from(1000)),
            Decimal::from(50)
        );
    }

    #[test]
    fn percent_discount_below_cap_is_proportional() {
        let coupon = percent_coupon();
        assert_eq!(coupon.discount_for(Decimal::from(100)), Decimal::from(10));
    }

    #[test]
    fn percent_discount_without_cap_is_unbounded() {
        let mut coupon = percent_coupon();
        coupon.max_discount = None;
        assert_eq!(
            coupon.discount_for(Decimal::from(1000)),
            Decimal::from(100)
        );
    }

    #[test]
    fn fixed_amount_applies_when_percent_is_zero() {
        let coupon = Coupon {
            id: 2,
            code: "GIAM30K".to_string(),
            discount_amount: Decimal::from(30000),
            discount_percent: Decimal::ZERO,
            max_discount: None,
        };
        assert_eq!(
            coupon.discount_for(Decimal::from(500000)),
            Decimal::from(30000)
        );
    }

    #[test]
    fn no_positive_discount_means_zero() {
        let coupon = Coupon {
            id: 3,
            code: "KHONG".to_string(),
            discount_amount: Decimal::ZERO,
            discount_percent: Decimal::ZERO,
            max_discount: None,
        };
        assert_eq!(coupon.discount_for(Decimal::from(500000)), Decimal::ZERO);
    }
}
