//! Session store trait: the single refresh-token slot per user.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainError;

/// Persists exactly one active refresh token per subject
///
/// Every operation is linearizable per subject. There is no history: a
/// replaced or cleared token is simply gone, which is what makes replaying
/// it detectable.
///
/// # Security Considerations
/// - Implementations must never log token values
/// - `compare_and_set_refresh_token` is the only operation that needs a lock
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Overwrite the slot with `token`
    async fn set_refresh_token(&self, user_id: Uuid, token: &str) -> Result<(), DomainError>;

    /// Read the slot
    ///
    /// # Returns
    /// * `Ok(Some(token))` - A session is live
    /// * `Ok(None)` - The slot is empty
    async fn get_refresh_token(&self, user_id: Uuid) -> Result<Option<String>, DomainError>;

    /// Empty the slot; clearing an empty slot succeeds
    async fn clear_refresh_token(&self, user_id: Uuid) -> Result<(), DomainError>;

    /// Atomically replace the slot with `new` if it currently equals `expected`
    ///
    /// # Returns
    /// * `Ok(true)` - The slot held `expected` byte-for-byte and now holds `new`
    /// * `Ok(false)` - The slot held something else (or nothing); it is unchanged
    async fn compare_and_set_refresh_token(
        &self,
        user_id: Uuid,
        expected: &str,
        new: &str,
    ) -> Result<bool, DomainError>;
}
