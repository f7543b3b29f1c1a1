//! Main authentication service implementation

use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::session::SessionState;
use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{User, UserProfile};
use crate::domain::value_objects::{ChangePasswordInput, LoginInput, LoginResult, RegisterInput};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{ObjectStorage, SessionStore, UserRepository};
use crate::services::password::{BcryptPasswordHasher, PasswordHasher};
use crate::services::token::TokenIssuer;

use super::config::AuthServiceConfig;

/// Authentication service orchestrating credentials, tokens and sessions
///
/// This is the only component that talks to more than one of the others.
/// All per-subject state lives in the [`SessionStore`]; the service itself
/// holds nothing mutable.
pub struct AuthService<U, S, H = BcryptPasswordHasher>
where
    U: UserRepository,
    S: SessionStore,
    H: PasswordHasher + 'static,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Single refresh slot per user
    session_store: Arc<S>,
    /// Token signing and verification
    token_issuer: Arc<TokenIssuer>,
    /// Credential hashing
    password_hasher: Arc<H>,
    /// Where uploaded profile images go
    object_storage: Option<Arc<dyn ObjectStorage>>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, S, H> AuthService<U, S, H>
where
    U: UserRepository,
    S: SessionStore,
    H: PasswordHasher + 'static,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `session_store` - Store holding the current refresh token per user
    /// * `token_issuer` - Signs and verifies JWTs
    /// * `password_hasher` - Hashes and verifies passwords
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        session_store: Arc<S>,
        token_issuer: Arc<TokenIssuer>,
        password_hasher: Arc<H>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            session_store,
            token_issuer,
            password_hasher,
            object_storage: None,
            config,
        }
    }

    /// Attach object storage for registration uploads
    pub fn with_object_storage(mut self, storage: Arc<dyn ObjectStorage>) -> Self {
        self.object_storage = Some(storage);
        self
    }

    /// The issuer used for every token this service mints
    pub fn token_issuer(&self) -> &Arc<TokenIssuer> {
        &self.token_issuer
    }

    /// Register a new account
    ///
    /// This method:
    /// 1. Rejects blank fields and lower-cases the username
    /// 2. Refuses a taken username or email with `Conflict`
    /// 3. Uploads the avatar (required when so configured) and the cover image
    /// 4. Hashes the password and persists the user
    ///
    /// The new account starts with an empty refresh slot.
    pub async fn register(&self, input: RegisterInput) -> DomainResult<UserProfile> {
        let input = input.normalized()?;

        if self
            .user_repository
            .exists_by_username_or_email(Some(&input.username), Some(&input.email))
            .await?
        {
            tracing::info!(username = %input.username, "registration refused: identity taken");
            return Err(AuthError::UserAlreadyExists.into());
        }

        let avatar = match input.avatar_path.as_deref() {
            Some(path) => self.upload(path).await.map_err(|e| {
                tracing::warn!(error = %e, "avatar upload failed");
                DomainError::from(ValidationError::UploadFailed {
                    field: "avatar".to_string(),
                })
            })?,
            None if self.config.require_avatar => {
                return Err(ValidationError::required("avatar").into());
            }
            None => String::new(),
        };

        // A failed cover upload leaves the cover blank.
        let cover_image = match input.cover_image_path.as_deref() {
            Some(path) => self.upload(path).await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "cover image upload failed");
                String::new()
            }),
            None => String::new(),
        };

        let password_hash = self.hash_password(input.password).await?;
        let user = User::new(input.username, input.email, input.full_name, password_hash)
            .with_images(avatar, cover_image);

        let created = self.user_repository.create(user).await?;
        tracing::info!(user_id = %created.id, username = %created.username, "user registered");

        Ok(created.profile())
    }

    /// Authenticate with username or email plus password
    ///
    /// On success a fresh pair is issued and its refresh token replaces
    /// whatever the slot held before.
    ///
    /// # Returns
    ///
    /// * `Ok(LoginResult)` - Sanitized user and the new pair
    /// * `Err(InvalidInput)` - Neither identifier supplied
    /// * `Err(NotFound)` - No user matches
    /// * `Err(InvalidCredentials)` - Password mismatch
    pub async fn login(&self, input: LoginInput) -> DomainResult<LoginResult> {
        let (username, email) = input.identifiers()?;

        let user = self
            .user_repository
            .find_by_username_or_email(username.as_deref(), email.as_deref())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.verify_password(input.password, &user.password_hash).await? {
            tracing::warn!(user_id = %user.id, "login rejected");
            return Err(AuthError::InvalidCredentials.into());
        }

        let tokens = self.token_issuer.issue_pair(&user)?;
        self.session_store
            .set_refresh_token(user.id, &tokens.refresh_token)
            .await?;

        tracing::info!(user_id = %user.id, "user logged in");
        Ok(LoginResult::new(user.profile(), tokens))
    }

    /// End the subject's session; succeeds even if none is live
    pub async fn logout(&self, user_id: Uuid) -> DomainResult<()> {
        self.session_store.clear_refresh_token(user_id).await?;
        tracing::info!(user_id = %user_id, "user logged out");
        Ok(())
    }

    /// Rotate the session presented by `presented_refresh_token`
    ///
    /// The presented token must verify and must be the one currently in the
    /// slot. A new pair is minted before anything is written, and the
    /// compare-and-set against the presented value is the single commit
    /// point: of several concurrent calls with the same token exactly one
    /// wins and the rest see `SessionRevoked`.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The rotated pair
    /// * `Err(Unauthenticated)` - No token presented, or the user is gone
    /// * `Err(TokenInvalid | TokenExpired)` - Token failed verification
    /// * `Err(SessionRevoked)` - Token is not (or no longer) the live one
    pub async fn refresh_session(
        &self,
        presented_refresh_token: Option<&str>,
    ) -> DomainResult<TokenPair> {
        let presented = presented_refresh_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::Unauthenticated)?;

        let user_id = self.token_issuer.verify_refresh_token(presented).map_err(|e| {
            tracing::debug!(code = e.code(), "refresh token failed verification");
            e
        })?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        let stored = self.session_store.get_refresh_token(user.id).await?;
        if !SessionState::from_slot(stored.as_deref(), presented).is_authenticated() {
            tracing::warn!(user_id = %user.id, "refresh token is not the live session");
            return Err(AuthError::SessionRevoked.into());
        }

        let tokens = self.token_issuer.issue_pair(&user)?;

        let committed = self
            .session_store
            .compare_and_set_refresh_token(user.id, presented, &tokens.refresh_token)
            .await?;
        if !committed {
            tracing::warn!(user_id = %user.id, "lost refresh rotation race");
            return Err(AuthError::SessionRevoked.into());
        }

        tracing::debug!(user_id = %user.id, "session rotated");
        Ok(tokens)
    }

    /// Change the subject's password after checking the old one
    ///
    /// Live sessions survive unless `revoke_sessions_on_password_change`
    /// is set.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        input: ChangePasswordInput,
    ) -> DomainResult<()> {
        input.check()?;

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self
            .verify_password(input.old_password, &user.password_hash)
            .await?
        {
            tracing::warn!(user_id = %user_id, "password change rejected");
            return Err(AuthError::InvalidCredentials.into());
        }

        let new_hash = self.hash_password(input.new_password).await?;
        user.set_password_hash(new_hash);
        self.user_repository.update(user).await?;

        if self.config.revoke_sessions_on_password_change {
            self.session_store.clear_refresh_token(user_id).await?;
        }

        tracing::info!(user_id = %user_id, "password changed");
        Ok(())
    }

    /// Sanitized view of the subject
    pub async fn current_user(&self, user_id: Uuid) -> DomainResult<UserProfile> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .map(|user| user.profile())
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Current session state for a subject and a presented refresh token
    pub async fn session_state(&self, user_id: Uuid, presented: &str) -> DomainResult<SessionState> {
        let stored = self.session_store.get_refresh_token(user_id).await?;
        Ok(SessionState::from_slot(stored.as_deref(), presented))
    }

    async fn upload(&self, path: &Path) -> DomainResult<String> {
        let storage = self
            .object_storage
            .as_ref()
            .ok_or_else(|| DomainError::internal("object storage is not configured"))?;
        storage.upload(path).await
    }

    // bcrypt is deliberately slow; keep it off the async workers.
    async fn hash_password(&self, plaintext: String) -> DomainResult<String> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(DomainError::internal)?
    }

    async fn verify_password(&self, plaintext: String, hash: &str) -> DomainResult<bool> {
        let hasher = Arc::clone(&self.password_hasher);
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
            .await
            .map_err(DomainError::internal)
    }
}
