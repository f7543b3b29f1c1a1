use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use sv_core::domain::entities::user::User;
use sv_core::errors::{AuthError, DomainError};
use sv_core::repositories::UserRepository;

/// User repository backed by a map guarded by a single lock
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

// Case-insensitive, like the MySQL table's `_ci` collation
fn matches(user: &User, username: Option<&str>, email: Option<&str>) -> bool {
    let same = |stored: &str, given: &str| stored.to_lowercase() == given.to_lowercase();
    username.map_or(false, |u| same(&user.username, u))
        || email.map_or(false, |e| same(&user.email, e))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| matches(u, username, email))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        // Uniqueness check and insert under one write lock.
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| matches(u, Some(&user.username), Some(&user.email)))
        {
            return Err(AuthError::UserAlreadyExists.into());
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.id != user.id && matches(u, Some(&user.username), Some(&user.email)))
        {
            return Err(AuthError::UserAlreadyExists.into());
        }
        match users.get_mut(&user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(user)
            }
            None => Err(AuthError::UserNotFound.into()),
        }
    }

    async fn exists_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<bool, DomainError> {
        Ok(self.find_by_username_or_email(username, email).await?.is_some())
    }
}
