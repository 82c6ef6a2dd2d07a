//! Order repository: listings, the order-creation transaction, and the
//! transactional delete of an order together with its line items

use anyhow::Result;
use sqlx::{PgPool, Row};
use thiserror::Error;

use crate::models::order::{NewOrder, Order, OrderChanges, OrderStatus, OrderSummary};

/// Failure points of the order-creation transaction
#[derive(Debug, Error)]
pub enum CreateOrderError {
    #[error("failed to begin order transaction")]
    Begin(#[source] sqlx::Error),

    #[error("failed to insert order header")]
    Header(#[source] sqlx::Error),

    #[error("failed to insert order line items")]
    Items(#[source] sqlx::Error),

    #[error("failed to commit order transaction")]
    Commit(#[source] sqlx::Error),
}

/// Failure points of the order-delete transaction
#[derive(Debug, Error)]
pub enum DeleteOrderError {
    #[error("failed to begin delete transaction")]
    Begin(#[source] sqlx::Error),

    #[error("failed to delete order line items")]
    Items(#[source] sqlx::Error),

    #[error("failed to delete order header")]
    Header(#[source] sqlx::Error),

    #[error("failed to commit delete transaction")]
    Commit(#[source] sqlx::Error),
}

/// Order repository for database operations
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All orders, newest first
    pub async fn get_all(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, total_amount, subtotal, shipping_fee, coupon_discount,
                   coupon_code, shipping_address, payment_method, status, order_date
            FROM orders
            ORDER BY order_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let orders = rows
            .into_iter()
            .map(|row| Order {
                order_id: row.get("id"),
                user_id: row.get("user_id"),
                total_amount: row.get("total_amount"),
                subtotal: row.get("subtotal"),
                shipping_fee: row.get("shipping_fee"),
                coupon_discount: row.get("coupon_discount"),
                coupon_code: row.get("coupon_code"),
                shipping_address: row.get("shipping_address"),
                payment_method: row.get("payment_method"),
                status: row.get("status"),
                order_date: row.get("order_date"),
            })
            .collect();

        Ok(orders)
    }

    /// A customer's order history, newest first. The status column is the
    /// stored code; display mapping happens in the handler.
    pub async fn get_by_user(&self, user_id: i64) -> Result<Vec<OrderSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT id, to_char(order_date, 'YYYY-MM-DD') AS order_date,
                   status, total_amount, shipping_address
            FROM orders
            WHERE user_id = $1
            ORDER BY order_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let orders = rows
            .into_iter()
            .map(|row| OrderSummary {
                order_id: row.get("id"),
                order_date: row.get("order_date"),
                status: row.get("status"),
                total_amount: row.get("total_amount"),
                shipping_address: row.get("shipping_address"),
            })
            .collect();

        Ok(orders)
    }

    /// Insert the order header and its line items in one transaction and
    /// return the generated order identifier. On any failure the transaction
    /// is rolled back; no partial order persists.
    pub async fn create(&self, order: &NewOrder) -> Result<i64, CreateOrderError> {
        let mut tx = self.pool.begin().await.map_err(CreateOrderError::Begin)?;

        let row = sqlx::query(
            r#"
            INSERT INTO orders (user_id, total_amount, subtotal, shipping_fee,
                                coupon_discount, coupon_code, shipping_address,
                                payment_method, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(order.user_id)
        .bind(order.total_amount)
        .bind(order.subtotal)
        .bind(order.shipping_fee)
        .bind(order.coupon_discount)
        .bind(&order.coupon_code)
        .bind(&order.shipping_address)
        .bind(&order.payment_method)
        .bind(OrderStatus::Pending.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(CreateOrderError::Header)?;

        let order_id: i64 = row.get("id");

        for item in &order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .execute(&mut *tx)
            .await
            .map_err(CreateOrderError::Items)?;
        }

        tx.commit().await.map_err(CreateOrderError::Commit)?;

        Ok(order_id)
    }

    /// Full overwrite of the mutable order fields
    pub async fn update(&self, id: i64, changes: &OrderChanges) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET total_amount = $1, shipping_address = $2, payment_method = $3, status = $4
            WHERE id = $5
            "#,
        )
        .bind(changes.total_amount)
        .bind(&changes.shipping_address)
        .bind(&changes.payment_method)
        .bind(changes.status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete an order and its line items in one transaction. Returns false
    /// when no order matched; an order without line items is not an error.
    pub async fn delete(&self, id: i64) -> Result<bool, DeleteOrderError> {
        let mut tx = self.pool.begin().await.map_err(DeleteOrderError::Begin)?;

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DeleteOrderError::Items)?;

        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DeleteOrderError::Header)?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls back the line-item delete.
            return Ok(false);
        }

        tx.commit().await.map_err(DeleteOrderError::Commit)?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::{NewOrder, NewOrderItem};
    use crate::models::product::ProductInput;
    use crate::models::user::NewUser;
    use crate::repositories::{products::ProductRepository, users::UserRepository};
    use common::database::{DatabaseConfig, init_pool};
    use rust_decimal::Decimal;

    async fn test_pool() -> PgPool {
        let config = DatabaseConfig::from_env().expect("database config");
        init_pool(&config).await.expect("database pool")
    }

    fn unique_email(prefix: &str) -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        format!("{}+{}@example.com", prefix, nanos)
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance with schema.sql applied"]
    async fn order_create_and_delete_roundtrip() {
        let pool = test_pool().await;
        let users = UserRepository::new(pool.clone());
        let products = ProductRepository::new(pool.clone());
        let orders = OrderRepository::new(pool.clone());

        let user_id = users
            .create(&NewUser {
                name: "Khách kiểm thử".to_string(),
                email: unique_email("khach"),
                phone: "0900000000".to_string(),
                address: "1 Phố Huế, Hà Nội".to_string(),
                password: "m@tKhau123".to_string(),
                is_admin: false,
            })
            .await
            .expect("create user");

        let product_id = products
            .create(&ProductInput {
                name: "Sữa rửa mặt".to_string(),
                category: "Chăm sóc da".to_string(),
                brand: "Cetaphil".to_string(),
                price: Decimal::new(185000, 0),
                stock: 10,
                description: "Dịu nhẹ cho da nhạy cảm".to_string(),
                image: "/images/sua-rua-mat.jpg".to_string(),
            })
            .await
            .expect("create product");

        let order_id = orders
            .create(&NewOrder {
                user_id,
                items: vec![
                    NewOrderItem {
                        product_id,
                        quantity: 2,
                        unit_price: Decimal::new(185000, 0),
                    },
                    NewOrderItem {
                        product_id,
                        quantity: 1,
                        unit_price: Decimal::new(185000, 0),
                    },
                ],
                shipping_address: "1 Phố Huế, Hà Nội".to_string(),
                payment_method: "cod".to_string(),
                total_amount: Decimal::new(570000, 0),
                subtotal: Decimal::new(555000, 0),
                shipping_fee: Decimal::new(15000, 0),
                coupon_discount: Decimal::ZERO,
                coupon_code: None,
            })
            .await
            .expect("create order");

        let item_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE order_id = $1")
                .bind(order_id)
                .fetch_one(&pool)
                .await
                .expect("count line items");
        assert_eq!(item_count, 2);

        let history = orders.get_by_user(user_id).await.expect("order history");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].order_id, order_id);
        assert_eq!(history[0].status, "pending");

        assert!(orders.delete(order_id).await.expect("delete order"));
        assert!(!orders.delete(order_id).await.expect("second delete"));

        let leftover: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE order_id = $1")
                .bind(order_id)
                .fetch_one(&pool)
                .await
                .expect("count leftovers");
        assert_eq!(leftover, 0);

        products.delete(product_id).await.expect("cleanup product");
        users.delete(user_id).await.expect("cleanup user");
    }
}
