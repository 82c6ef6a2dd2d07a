//! Order confirmation mail over SMTP

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use rust_decimal::Decimal;
use std::env;
use thiserror::Error;

use crate::models::order::OrderConfirmationDetails;

/// SMTP configuration struct
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP relay host
    pub host: String,
    /// SMTP relay port
    pub port: u16,
    /// Relay account username
    pub username: String,
    /// Relay account password
    pub password: String,
    /// Sender address for confirmation mail
    pub from_address: String,
}

impl SmtpConfig {
    /// Create a new SmtpConfig from environment variables
    pub fn from_env() -> Self {
        let host = env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);
        let username = env::var("SMTP_USERNAME").unwrap_or_default();
        let password = env::var("SMTP_PASSWORD").unwrap_or_default();
        let from_address =
            env::var("SMTP_FROM").unwrap_or_else(|_| "no-reply@sapastore.vn".to_string());

        Self {
            host,
            port,
            username,
            password,
            from_address,
        }
    }
}

/// Errors that can occur when sending the confirmation mail
#[derive(Debug, Error)]
pub enum MailError {
    /// SMTP transport error
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build the mail message
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid sender or recipient address
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Sends transactional order mail over SMTP
#[derive(Clone)]
pub struct OrderMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl OrderMailer {
    /// Create a new mailer from configuration
    pub fn new(config: &SmtpConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    /// Send the confirmation mail for a placed order. Dispatch failures are
    /// surfaced to the caller; nothing is retried.
    pub async fn send_order_confirmation(
        &self,
        to: &str,
        order_id: i64,
        details: &OrderConfirmationDetails,
    ) -> Result<(), MailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| MailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| MailError::InvalidAddress(to.to_string()))?)
            .subject(format!("Xác nhận đơn hàng #{}", order_id))
            .header(ContentType::TEXT_HTML)
            .body(confirmation_body(order_id, details))?;

        self.mailer.send(email).await?;

        Ok(())
    }
}

/// Render the HTML body for an order confirmation
pub fn confirmation_body(order_id: i64, details: &OrderConfirmationDetails) -> String {
    let mut items = String::new();
    for item in &details.order_items {
        let line_total = item.price * Decimal::from(item.quantity);
        items.push_str(&format!(
            "<li>{} x {} = {}đ</li>",
            item.product_name, item.quantity, line_total
        ));
    }

    format!(
        "<h1>Cảm ơn bạn đã đặt hàng!</h1>\
         <p>Xin chào {},</p>\
         <p>Đơn hàng #{} của bạn đã được xác nhận.</p>\
         <h3>Chi tiết đơn hàng:</h3>\
         <ul>{}</ul>\
         <p>Tổng tiền: {}đ</p>\
         <p>Địa chỉ giao hàng: {}</p>\
         <p>Chúng tôi sẽ xử lý và giao hàng trong thời gian sớm nhất.</p>\
         <p>Mọi thắc mắc xin vui lòng liên hệ hotline: 0123456789</p>",
        details.customer_name, order_id, items, details.total_amount, details.shipping_address
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::ConfirmationItem;
    use rust_decimal::Decimal;

    fn sample_details() -> OrderConfirmationDetails {
        OrderConfirmationDetails {
            customer_name: "Nguyễn Văn A".to_string(),
            order_items: vec![
                ConfirmationItem {
                    product_name: "Trà ô long".to_string(),
                    quantity: 2,
                    price: Decimal::new(45000, 0),
                },
                ConfirmationItem {
                    product_name: "Cà phê sữa".to_string(),
                    quantity: 1,
                    price: Decimal::new(30000, 0),
                },
            ],
            total_amount: Decimal::new(120000, 0),
            shipping_address: "12 Lý Thường Kiệt, Hà Nội".to_string(),
        }
    }

    #[test]
    fn body_contains_order_number_and_customer() {
        let body = confirmation_body(42, &sample_details());
        assert!(body.contains("Đơn hàng #42"));
        assert!(body.contains("Xin chào Nguyễn Văn A"));
    }

    #[test]
    fn body_lists_items_with_line_totals() {
        let body = confirmation_body(42, &sample_details());
        assert!(body.contains("<li>Trà ô long x 2 = 90000đ</li>"));
        assert!(body.contains("<li>Cà phê sữa x 1 = 30000đ</li>"));
    }

    #[test]
    fn body_contains_total_and_address() {
        let body = confirmation_body(42, &sample_details());
        assert!(body.contains("Tổng tiền: 120000đ"));
        assert!(body.contains("12 Lý Thường Kiệt, Hà Nội"));
    }
}
