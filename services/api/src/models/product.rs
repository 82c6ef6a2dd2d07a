//! Product catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product row as served to the catalog listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: String,
    pub image: String,
}

/// Payload for creating or overwriting a product
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Validated product fields after presence checks
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: String,
    pub image: String,
}

impl ProductPayload {
    /// Every field is required; price and stock may be zero but not absent.
    pub fn into_input(self) -> Option<ProductInput> {
        Some(ProductInput {
            name: self.name.filter(|s| !s.is_empty())?,
            category: self.category.filter(|s| !s.is_empty())?,
            brand: self.brand.filter(|s| !s.is_empty())?,
            price: self.price?,
            stock: self.stock?,
            description: self.description.filter(|s| !s.is_empty())?,
            image: self.image.filter(|s| !s.is_empty())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> ProductPayload {
        ProductPayload {
            name: Some("Son môi đỏ".to_string()),
            category: Some("Trang điểm".to_string()),
            brand: Some("Maybelline".to_string()),
            price: Some(Decimal::new(199000, 0)),
            stock: Some(25),
            description: Some("Son lì lâu trôi".to_string()),
            image: Some("/images/son-do.jpg".to_string()),
        }
    }

    #[test]
    fn complete_payload_validates() {
        assert!(full_payload().into_input().is_some());
    }

    #[test]
    fn zero_price_and_stock_are_allowed() {
        let mut payload = full_payload();
        payload.price = Some(Decimal::ZERO);
        payload.stock = Some(0);
        let input = payload.into_input().expect("zero values must pass");
        assert_eq!(input.price, Decimal::ZERO);
        assert_eq!(input.stock, 0);
    }

    #[test]
    fn missing_field_fails_validation() {
        let mut payload = full_payload();
        payload.brand = None;
        assert!(payload.into_input().is_none());
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let mut payload = full_payload();
        payload.name = Some(String::new());
        assert!(payload.into_input().is_none());
    }
}
