//! Configuration for the authentication service

use sv_shared::AuthConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone, Default)]
pub struct AuthServiceConfig {
    /// Clear the refresh slot after a successful password change
    pub revoke_sessions_on_password_change: bool,
    /// Refuse registrations that carry no avatar
    pub require_avatar: bool,
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            revoke_sessions_on_password_change: config.revoke_sessions_on_password_change,
            require_avatar: config.require_avatar,
        }
    }
}
