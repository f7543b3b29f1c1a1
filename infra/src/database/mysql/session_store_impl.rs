//! MySQL implementation of the SessionStore trait.
//!
//! The slot is the nullable `users.refresh_token` column. Rotation is a single
//! conditional `UPDATE`, so the row lock MySQL takes for it is the only
//! serialization point between concurrent refreshes.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sv_core::errors::DomainError;
use sv_core::repositories::SessionStore;

use super::db_error;

/// MySQL implementation of SessionStore
pub struct MySqlSessionStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlSessionStore {
    /// Create a new MySQL session store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn write_slot(&self, user_id: Uuid, token: Option<&str>) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET refresh_token = ?, updated_at = ? WHERE id = ?")
            .bind(token)
            .bind(Utc::now())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to write session slot", e))?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MySqlSessionStore {
    async fn set_refresh_token(&self, user_id: Uuid, token: &str) -> Result<(), DomainError> {
        self.write_slot(user_id, Some(token)).await
    }

    async fn get_refresh_token(&self, user_id: Uuid) -> Result<Option<String>, DomainError> {
        let row = sqlx::query("SELECT refresh_token FROM users WHERE id = ? LIMIT 1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to read session slot", e))?;

        match row {
            Some(row) => row
                .try_get::<Option<String>, _>("refresh_token")
                .map_err(|e| DomainError::internal(format!("Failed to get refresh_token: {}", e))),
            None => Ok(None),
        }
    }

    async fn clear_refresh_token(&self, user_id: Uuid) -> Result<(), DomainError> {
        self.write_slot(user_id, None).await
    }

    async fn compare_and_set_refresh_token(
        &self,
        user_id: Uuid,
        expected: &str,
        new: &str,
    ) -> Result<bool, DomainError> {
        // BINARY forces a byte comparison regardless of the column collation.
        let result = sqlx::query(
            "UPDATE users SET refresh_token = ?, updated_at = ? \
             WHERE id = ? AND refresh_token = BINARY ?",
        )
        .bind(new)
        .bind(Utc::now())
        .bind(user_id.to_string())
        .bind(expected)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to rotate session slot", e))?;

        Ok(result.rows_affected() == 1)
    }
}
