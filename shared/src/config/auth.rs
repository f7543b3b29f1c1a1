//! Authentication and session configuration

use serde::{Deserialize, Serialize};

use super::{env_lookup, parse_duration_secs, required_var, ConfigError};

/// JWT signing configuration
///
/// Access and refresh tokens are signed with independent secrets so that a
/// leaked access secret cannot mint refresh tokens and vice versa.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret for signing access tokens
    pub access_token_secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Secret for signing refresh tokens
    pub refresh_token_secret: String,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// JWT audience claim
    #[serde(default = "default_audience")]
    pub audience: String,
}

// Secrets stay out of debug output.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_token_secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_secret", &"<redacted>")
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl JwtConfig {
    /// Create a configuration from explicit secrets with default expiries
    /// (15 minutes for access, 10 days for refresh).
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_token_secret: access_secret.into(),
            access_token_expiry: 900,
            refresh_token_secret: refresh_secret.into(),
            refresh_token_expiry: 864_000,
            issuer: default_issuer(),
            audience: default_audience(),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86_400;
        self
    }

    /// Load from environment variables
    ///
    /// Reads `ACCESS_TOKEN_SECRET`, `ACCESS_TOKEN_EXPIRY`,
    /// `REFRESH_TOKEN_SECRET` and `REFRESH_TOKEN_EXPIRY`. All four are
    /// required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token_secret = required_var(&lookup, "ACCESS_TOKEN_SECRET")?;
        let access_token_expiry = parse_duration_secs(
            "ACCESS_TOKEN_EXPIRY",
            &required_var(&lookup, "ACCESS_TOKEN_EXPIRY")?,
        )?;
        let refresh_token_secret = required_var(&lookup, "REFRESH_TOKEN_SECRET")?;
        let refresh_token_expiry = parse_duration_secs(
            "REFRESH_TOKEN_EXPIRY",
            &required_var(&lookup, "REFRESH_TOKEN_EXPIRY")?,
        )?;

        if access_token_secret == refresh_token_secret {
            return Err(ConfigError::Invalid {
                key: "REFRESH_TOKEN_SECRET".to_string(),
                value: "must differ from ACCESS_TOKEN_SECRET".to_string(),
            });
        }

        if access_token_expiry >= refresh_token_expiry {
            return Err(ConfigError::Invalid {
                key: "ACCESS_TOKEN_EXPIRY".to_string(),
                value: "must be shorter than REFRESH_TOKEN_EXPIRY".to_string(),
            });
        }

        Ok(Self {
            access_token_secret,
            access_token_expiry,
            refresh_token_secret,
            refresh_token_expiry,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(default_issuer),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(default_audience),
        })
    }
}

/// Session cookie configuration
///
/// There is deliberately no switch for `HttpOnly` or `Secure`: both are
/// always set on session cookies.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Cookie carrying the access token
    pub access_cookie_name: String,

    /// Cookie carrying the refresh token
    pub refresh_cookie_name: String,

    /// Cookie SameSite attribute ("Strict", "Lax" or "None")
    pub same_site: String,

    /// Cookie path
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: String::from("accessToken"),
            refresh_cookie_name: String::from("refreshToken"),
            same_site: String::from("Strict"),
            path: String::from("/"),
        }
    }
}

impl SessionConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_cookie_name: env_lookup("SESSION_ACCESS_COOKIE")
                .unwrap_or(defaults.access_cookie_name),
            refresh_cookie_name: env_lookup("SESSION_REFRESH_COOKIE")
                .unwrap_or(defaults.refresh_cookie_name),
            same_site: env_lookup("SESSION_SAME_SITE").unwrap_or(defaults.same_site),
            path: env_lookup("SESSION_COOKIE_PATH").unwrap_or(defaults.path),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// bcrypt cost factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Revoke the live session when a user changes their password
    #[serde(default)]
    pub revoke_sessions_on_password_change: bool,

    /// Require an avatar upload on registration
    #[serde(default)]
    pub require_avatar: bool,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let bcrypt_cost = match env_lookup("BCRYPT_COST") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "BCRYPT_COST".to_string(),
                value: raw,
            })?,
            None => default_bcrypt_cost(),
        };

        Ok(Self {
            jwt: JwtConfig::from_env()?,
            session: SessionConfig::from_env(),
            bcrypt_cost,
            revoke_sessions_on_password_change: env_flag("REVOKE_SESSIONS_ON_PASSWORD_CHANGE"),
            require_avatar: env_flag("REQUIRE_AVATAR"),
        })
    }

    /// Create with the given JWT settings and default everything else
    pub fn with_jwt(jwt: JwtConfig) -> Self {
        Self {
            jwt,
            session: SessionConfig::default(),
            bcrypt_cost: default_bcrypt_cost(),
            revoke_sessions_on_password_change: false,
            require_avatar: false,
        }
    }
}

fn env_flag(key: &str) -> bool {
    env_lookup(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn default_issuer() -> String {
    String::from("streamvault")
}

fn default_audience() -> String {
    String::from("streamvault-api")
}

fn default_bcrypt_cost() -> u32 {
    10
}
