//! MySQL implementation of the UserRepository trait.
//!
//! Users live in the `users` table. The `refresh_token` column on the same
//! row belongs to [`MySqlSessionStore`](super::MySqlSessionStore) and is never
//! written from here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sv_core::domain::entities::user::User;
use sv_core::errors::{AuthError, DomainError};
use sv_core::repositories::UserRepository;

use super::db_error;

const USER_COLUMNS: &str = "id, username, email, full_name, avatar, cover_image, \
                            password_hash, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let column = |name: &str, e: sqlx::Error| {
            DomainError::internal(format!("Failed to get {}: {}", name, e))
        };

        let id: String = row.try_get("id").map_err(|e| column("id", e))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid UUID: {}", e)))?,
            username: row.try_get("username").map_err(|e| column("username", e))?,
            email: row.try_get("email").map_err(|e| column("email", e))?,
            full_name: row.try_get("full_name").map_err(|e| column("full_name", e))?,
            avatar: row.try_get("avatar").map_err(|e| column("avatar", e))?,
            cover_image: row
                .try_get("cover_image")
                .map_err(|e| column("cover_image", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column("password_hash", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column("updated_at", e))?,
        })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, DomainError> {
        if username.is_none() && email.is_none() {
            return Ok(None);
        }

        // A NULL bind never compares equal, so an absent identifier never matches.
        let query = format!(
            "SELECT {} FROM users WHERE username = ? OR email = ? LIMIT 1",
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(username)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("User lookup failed", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("User lookup failed", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, username, email, full_name, avatar, cover_image,
                password_hash, refresh_token, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, NULL, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.avatar)
            .bind(&user.cover_image)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(user),
            Err(e) if is_unique_violation(&e) => Err(AuthError::UserAlreadyExists.into()),
            Err(e) => Err(db_error("Failed to create user", e)),
        }
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                username = ?,
                email = ?,
                full_name = ?,
                avatar = ?,
                cover_image = ?,
                password_hash = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.avatar)
            .bind(&user.cover_image)
            .bind(&user.password_hash)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => {
                // MySQL reports zero for an unchanged row too; tell the two apart.
                match self.find_by_id(user.id).await? {
                    Some(_) => Ok(user),
                    None => Err(AuthError::UserNotFound.into()),
                }
            }
            Ok(_) => Ok(user),
            Err(e) if is_unique_violation(&e) => Err(AuthError::UserAlreadyExists.into()),
            Err(e) => Err(db_error("Failed to update user", e)),
        }
    }

    async fn exists_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<bool, DomainError> {
        if username.is_none() && email.is_none() {
            return Ok(false);
        }

        let row = sqlx::query(
            "SELECT COUNT(*) AS present FROM users WHERE username = ? OR email = ?",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("User existence check failed", e))?;

        let present: i64 = row
            .try_get("present")
            .map_err(|e| DomainError::internal(format!("Failed to get present: {}", e)))?;
        Ok(present > 0)
    }
}
