//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and uses Result types for proper error handling.
//! Refresh tokens are deliberately absent: they belong to [`SessionStore`].
//!
//! [`SessionStore`]: crate::repositories::SessionStore

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use sv_core::repositories::UserRepository;
/// use sv_core::domain::entities::user::User;
/// use sv_core::errors::DomainError;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn find_by_username_or_email(
///         &self,
///         username: Option<&str>,
///         email: Option<&str>,
///     ) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_id(&self, _: Uuid) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn create(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn update(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn exists_by_username_or_email(&self, _: Option<&str>, _: Option<&str>) -> Result<bool, DomainError> { Ok(false) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find the user whose username OR email matches
    ///
    /// Absent identifiers never match. With both absent the result is
    /// `Ok(None)`.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user matches either identifier
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user in the repository
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Username or email taken
    /// * `Err(DomainError)` - Creation failed for another reason
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Save an existing user
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError::Auth(AuthError::UserNotFound))` - No such user
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Check whether the username or the email is already taken
    async fn exists_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<bool, DomainError>;
}
