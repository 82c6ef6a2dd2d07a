//! Order models and lifecycle states

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle states. Transitions are driven entirely by explicit
/// update calls; there is no automatic transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipping,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Parse a stored status code
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "shipping" => Some(Self::Shipping),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Stored status code
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipping => "shipping",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Display label shown to customers
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Chờ xử lý",
            Self::Processing => "Đang xử lý",
            Self::Shipping => "Đang giao hàng",
            Self::Completed => "Hoàn tất",
            Self::Cancelled => "Đã hủy",
        }
    }
}

/// Translate a stored status code to its display label. Unknown codes pass
/// through unchanged.
pub fn status_label(code: &str) -> &str {
    OrderStatus::parse(code).map_or(code, |s| s.label())
}

/// Full order row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: i64,
    pub user_id: i64,
    pub total_amount: Decimal,
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub coupon_discount: Decimal,
    pub coupon_code: Option<String>,
    pub shipping_address: String,
    pub payment_method: String,
    pub status: String,
    pub order_date: DateTime<Utc>,
}

/// Row for a customer's order history; the handler swaps the stored status
/// code for its display label before responding
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: i64,
    pub order_date: String,
    pub status: String,
    pub total_amount: Decimal,
    pub shipping_address: String,
}

/// Line item as submitted at checkout
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload {
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Coupon the client applied at checkout, with its precomputed discount
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedCoupon {
    pub code: String,
    pub discount_amount: Decimal,
}

/// Payload for placing an order
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: Option<i64>,
    pub items: Option<Vec<OrderItemPayload>>,
    pub shipping_address: Option<String>,
    pub payment_method: Option<String>,
    pub total_amount: Option<Decimal>,
    pub subtotal: Option<Decimal>,
    pub shipping_fee: Option<Decimal>,
    pub coupon_applied: Option<AppliedCoupon>,
}

/// Validated order input handed to the data access layer
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i64,
    pub items: Vec<NewOrderItem>,
    pub shipping_address: String,
    pub payment_method: String,
    pub total_amount: Decimal,
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub coupon_discount: Decimal,
    pub coupon_code: Option<String>,
}

/// Validated line item
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl CreateOrderRequest {
    /// Presence checks for the order-creation flow. The item list must be
    /// non-empty; amounts may be zero but not absent; coupon fields fall
    /// back to null/zero when no coupon was applied.
    pub fn into_new_order(self) -> Option<NewOrder> {
        let items = self.items.filter(|items| !items.is_empty())?;

        let (coupon_code, coupon_discount) = match self.coupon_applied {
            Some(coupon) => (Some(coupon.code), coupon.discount_amount),
            None => (None, Decimal::ZERO),
        };

        Some(NewOrder {
            user_id: self.user_id?,
            items: items
                .into_iter()
                .map(|item| NewOrderItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
            shipping_address: self.shipping_address.filter(|s| !s.is_empty())?,
            payment_method: self.payment_method.filter(|s| !s.is_empty())?,
            total_amount: self.total_amount?,
            subtotal: self.subtotal?,
            shipping_fee: self.shipping_fee.unwrap_or(Decimal::ZERO),
            coupon_discount,
            coupon_code,
        })
    }
}

/// Payload for a full order overwrite
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub total_amount: Option<Decimal>,
    pub shipping_address: Option<String>,
    pub payment_method: Option<String>,
    pub order_status: Option<String>,
}

/// Validated order changes
#[derive(Debug, Clone)]
pub struct OrderChanges {
    pub total_amount: Decimal,
    pub shipping_address: String,
    pub payment_method: String,
    pub status: OrderStatus,
}

/// Confirmation returned after an order is placed
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedResponse {
    pub success: bool,
    pub message: String,
    pub order_id: i64,
}

/// Payload for dispatching an order confirmation mail
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendConfirmationRequest {
    pub order_id: Option<i64>,
    pub email: Option<String>,
    pub order_details: Option<OrderConfirmationDetails>,
}

/// Order summary embedded in the confirmation mail
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmationDetails {
    pub customer_name: String,
    pub order_items: Vec<ConfirmationItem>,
    pub total_amount: Decimal,
    pub shipping_address: String,
}

/// Line item inside the confirmation mail
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationItem {
    pub product_name: String,
    pub quantity: i32,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkout_request() -> CreateOrderRequest {
        CreateOrderRequest {
            user_id: Some(7),
            items: Some(vec![OrderItemPayload {
                product_id: 3,
                quantity: 2,
                unit_price: Decimal::new(99000, 0),
            }]),
            shipping_address: Some("45 Trần Hưng Đạo, Đà Nẵng".to_string()),
            payment_method: Some("cod".to_string()),
            total_amount: Some(Decimal::new(213000, 0)),
            subtotal: Some(Decimal::new(198000, 0)),
            shipping_fee: Some(Decimal::new(15000, 0)),
            coupon_applied: None,
        }
    }

    #[test]
    fn complete_request_validates() {
        let order = checkout_request().into_new_order().expect("must validate");
        assert_eq!(order.user_id, 7);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.coupon_code, None);
        assert_eq!(order.coupon_discount, Decimal::ZERO);
    }

    #[test]
    fn empty_item_list_is_rejected() {
        let mut request = checkout_request();
        request.items = Some(vec![]);
        assert!(request.into_new_order().is_none());
    }

    #[test]
    fn missing_subtotal_is_rejected() {
        let mut request = checkout_request();
        request.subtotal = None;
        assert!(request.into_new_order().is_none());
    }

    #[test]
    fn zero_total_is_allowed() {
        let mut request = checkout_request();
        request.total_amount = Some(Decimal::ZERO);
        assert!(request.into_new_order().is_some());
    }

    #[test]
    fn applied_coupon_fills_discount_fields() {
        let mut request = checkout_request();
        request.coupon_applied = Some(AppliedCoupon {
            code: "SALE10".to_string(),
            discount_amount: Decimal::new(19800, 0),
        });
        let order = request.into_new_order().expect("must validate");
        assert_eq!(order.coupon_code.as_deref(), Some("SALE10"));
        assert_eq!(order.coupon_discount, Decimal::new(19800, 0));
    }

    #[test]
    fn missing_shipping_fee_defaults_to_zero() {
        let mut request = checkout_request();
        request.shipping_fee = None;
        let order = request.into_new_order().expect("must validate");
        assert_eq!(order.shipping_fee, Decimal::ZERO);
    }

    #[test]
    fn status_labels_are_translated() {
        assert_eq!(status_label("pending"), "Chờ xử lý");
        assert_eq!(status_label("processing"), "Đang xử lý");
        assert_eq!(status_label("shipping"), "Đang giao hàng");
        assert_eq!(status_label("completed"), "Hoàn tất");
        assert_eq!(status_label("cancelled"), "Đã hủy");
    }

    #[test]
    fn unknown_status_codes_pass_through() {
        assert_eq!(status_label("archived"), "archived");
    }

    #[test]
    fn status_round_trips_through_codes() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipping,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
    }
}
