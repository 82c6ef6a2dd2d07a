//! Review repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};

use crate::models::review::ReviewWithAuthor;

/// Review repository for database operations
#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Create a new review repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reviews for a product joined with the reviewer's name, newest first
    pub async fn list_by_product(&self, product_id: i64) -> Result<Vec<ReviewWithAuthor>> {
        let rows = sqlx::query(
            r#"
            SELECT reviews.id, reviews.product_id, reviews.user_id, reviews.rating,
                   reviews.comment, reviews.created_at, users.name AS user_name
            FROM reviews
            JOIN users ON reviews.user_id = users.id
            WHERE reviews.product_id = $1
            ORDER BY reviews.created_at DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        let reviews = rows
            .into_iter()
            .map(|row| ReviewWithAuthor {
                id: row.get("id"),
                product_id: row.get("product_id"),
                user_id: row.get("user_id"),
                rating: row.get("rating"),
                comment: row.get("comment"),
                created_at: row.get("created_at"),
                user_name: row.get("user_name"),
            })
            .collect();

        Ok(reviews)
    }

    /// Check whether this user already reviewed this product
    pub async fn exists_for_pair(&self, product_id: i64, user_id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT id FROM reviews WHERE product_id = $1 AND user_id = $2")
            .bind(product_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Insert a review stamped with the current server time
    pub async fn create(
        &self,
        product_id: i64,
        user_id: i64,
        rating: i32,
        comment: &str,
    ) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO reviews (product_id, user_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, now())
            RETURNING id
            "#,
        )
        .bind(product_id)
        .bind(user_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("id"))
    }

    /// Re-read a stored review joined with its reviewer's name
    pub async fn get_with_author(&self, review_id: i64) -> Result<Option<ReviewWithAuthor>> {
        let row = sqlx::query(
            r#"
            SELECT reviews.id, reviews.product_id, reviews.user_id, reviews.rating,
                   reviews.comment, reviews.created_at, users.name AS user_name
            FROM reviews
            JOIN users ON reviews.user_id = users.id
            WHERE reviews.id = $1
            "#,
        )
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(ReviewWithAuthor {
                id: row.get("id"),
                product_id: row.get("product_id"),
                user_id: row.get("user_id"),
                rating: row.get("rating"),
                comment: row.get("comment"),
                created_at: row.get("created_at"),
                user_name: row.get("user_name"),
            })),
            None => Ok(None),
        }
    }

    /// Overwrite a review's rating and comment
    pub async fn update(&self, review_id: i64, rating: i32, comment: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE reviews SET rating = $1, comment = $2 WHERE id = $3")
            .bind(rating)
            .bind(comment)
            .bind(review_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete a review by identifier
    pub async fn delete(&self, review_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// True when an insert failed on the one-review-per-product-and-user unique
/// constraint
pub fn is_duplicate_review(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db| db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;
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
    async fn duplicate_review_hits_unique_constraint() {
        let pool = test_pool().await;
        let users = UserRepository::new(pool.clone());
        let products = ProductRepository::new(pool.clone());
        let reviews = ReviewRepository::new(pool.clone());

        let user_id = users
            .create(&NewUser {
                name: "Người đánh giá".to_string(),
                email: unique_email("danhgia"),
                phone: "0911111111".to_string(),
                address: "2 Lê Lợi, Đà Nẵng".to_string(),
                password: "m@tKhau123".to_string(),
                is_admin: false,
            })
            .await
            .expect("create user");

        let product_id = products
            .create(&ProductInput {
                name: "Kem chống nắng".to_string(),
                category: "Chăm sóc da".to_string(),
                brand: "Anessa".to_string(),
                price: Decimal::new(450000, 0),
                stock: 5,
                description: "SPF50+".to_string(),
                image: "/images/kem-chong-nang.jpg".to_string(),
            })
            .await
            .expect("create product");

        let review_id = reviews
            .create(product_id, user_id, 5, "Rất tốt")
            .await
            .expect("first review");

        let err = reviews
            .create(product_id, user_id, 4, "Lần thứ hai")
            .await
            .expect_err("duplicate review must fail");
        assert!(is_duplicate_review(&err));

        let listed = reviews
            .list_by_product(product_id)
            .await
            .expect("list reviews");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, review_id);

        reviews.delete(review_id).await.expect("cleanup review");
        products.delete(product_id).await.expect("cleanup product");
        users.delete(user_id).await.expect("cleanup user");
    }
}
