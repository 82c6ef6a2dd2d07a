//! Product repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};

use crate::models::product::{Product, ProductInput};

/// Product repository for database operations
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the whole catalog; no pagination or filtering
    pub async fn get_all(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, category, brand, price, stock, description, image_url
            FROM products
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let products = rows
            .into_iter()
            .map(|row| Product {
                id: row.get("id"),
                name: row.get("name"),
                category: row.get("category"),
                brand: row.get("brand"),
                price: row.get("price"),
                stock: row.get("stock"),
                description: row.get("description"),
                image: row.get("image_url"),
            })
            .collect();

        Ok(products)
    }

    /// Insert a new product
    pub async fn create(&self, input: &ProductInput) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (name, category, brand, price, stock, description, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.brand)
        .bind(input.price)
        .bind(input.stock)
        .bind(&input.description)
        .bind(&input.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("id"))
    }

    /// Full overwrite by identifier. Returns the number of matched rows;
    /// callers treat zero as success as well.
    pub async fn update(&self, id: i64, input: &ProductInput) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $1, category = $2, brand = $3, price = $4,
                stock = $5, description = $6, image_url = $7
            WHERE id = $8
            "#,
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.brand)
        .bind(input.price)
        .bind(input.stock)
        .bind(&input.description)
        .bind(&input.image)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete by identifier. Reviews and order items referencing the
    /// product are left in place.
    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Check that a product exists
    pub async fn exists(&self, id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT id FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }
}
