//! Configuration for the token issuer

use jsonwebtoken::Algorithm;
use sv_shared::JwtConfig;

/// Configuration for the token issuer
///
/// Access and refresh tokens each get their own secret and lifetime.
#[derive(Clone)]
pub struct TokenIssuerConfig {
    /// Secret for signing access tokens
    pub access_secret: String,
    /// Access token lifetime in seconds
    pub access_ttl_seconds: i64,
    /// Secret for signing refresh tokens
    pub refresh_secret: String,
    /// Refresh token lifetime in seconds
    pub refresh_ttl_seconds: i64,
    /// `iss` claim written and required
    pub issuer: String,
    /// `aud` claim written and required
    pub audience: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
}

impl std::fmt::Debug for TokenIssuerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuerConfig")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl From<&JwtConfig> for TokenIssuerConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            access_secret: jwt.access_token_secret.clone(),
            access_ttl_seconds: jwt.access_token_expiry,
            refresh_secret: jwt.refresh_token_secret.clone(),
            refresh_ttl_seconds: jwt.refresh_token_expiry,
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
            algorithm: Algorithm::HS256,
        }
    }
}
