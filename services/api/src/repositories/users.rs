//! User repository for database operations

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::user::{NewUser, UpdateUserRequest, UserRecord};

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
            .to_string();

        Ok(hash)
    }

    /// Register a new user. The password is hashed before it is stored.
    pub async fn create(&self, new_user: &NewUser) -> Result<i64> {
        info!("Registering user: {}", new_user.email);

        let password_hash = Self::hash_password(&new_user.password)?;

        let row = sqlx::query(
            r#"
            INSERT INTO users (name, email, phone, address, password_hash, is_admin)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.phone)
        .bind(&new_user.address)
        .bind(&password_hash)
        .bind(new_user.is_admin)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("id"))
    }

    /// Find a user by email for login
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, phone, address, password_hash, is_admin
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(UserRecord {
                id: row.get("id"),
                name: row.get("name"),
                email: row.get("email"),
                phone: row.get("phone"),
                address: row.get("address"),
                password_hash: row.get("password_hash"),
                is_admin: row.get("is_admin"),
            })),
            None => Ok(None),
        }
    }

    /// Verify a user's password against the stored hash
    pub fn verify_password(&self, user: &UserRecord, password: &str) -> Result<bool> {
        let Some(hash) = &user.password_hash else {
            return Ok(false);
        };

        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

        let argon2 = Argon2::default();
        let result = argon2.verify_password(password.as_bytes(), &parsed_hash);

        Ok(result.is_ok())
    }

    /// All users, including the credential hash column
    pub async fn get_all(&self) -> Result<Vec<UserRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, phone, address, password_hash, is_admin
            FROM users
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let users = rows
            .into_iter()
            .map(|row| UserRecord {
                id: row.get("id"),
                name: row.get("name"),
                email: row.get("email"),
                phone: row.get("phone"),
                address: row.get("address"),
                password_hash: row.get("password_hash"),
                is_admin: row.get("is_admin"),
            })
            .collect();

        Ok(users)
    }

    /// Check that a user exists
    pub async fn exists(&self, id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT id FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Full overwrite by identifier. Omitted fields are stored as NULL and a
    /// missing admin flag falls back to false; a provided password is
    /// re-hashed before storage.
    pub async fn update(&self, id: i64, update: &UpdateUserRequest) -> Result<u64> {
        let password_hash = match &update.password {
            Some(password) => Some(Self::hash_password(password)?),
            None => None,
        };

        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $1, email = $2, phone = $3, address = $4,
                password_hash = $5, is_admin = $6
            WHERE id = $7
            "#,
        )
        .bind(&update.name)
        .bind(&update.email)
        .bind(&update.phone)
        .bind(&update.address)
        .bind(&password_hash)
        .bind(update.is_admin.unwrap_or(false))
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete a user by identifier
    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies_and_rejects() {
        let hash = UserRepository::hash_password("m@tKhau123").expect("hashing works");
        assert!(hash.starts_with("$argon2"));

        let parsed = PasswordHash::new(&hash).expect("hash parses");
        let argon2 = Argon2::default();
        assert!(argon2.verify_password(b"m@tKhau123", &parsed).is_ok());
        assert!(argon2.verify_password(b"saimatkhau", &parsed).is_err());
    }
}
