//! Authentication results returned by the auth service.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::UserProfile;

/// Outcome of a successful login
///
/// Carries the sanitized user view next to the freshly issued pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResult {
    /// Sanitized user view
    pub user: UserProfile,

    /// Newly issued token pair
    pub tokens: TokenPair,
}

impl LoginResult {
    pub fn new(user: UserProfile, tokens: TokenPair) -> Self {
        Self { user, tokens }
    }
}
