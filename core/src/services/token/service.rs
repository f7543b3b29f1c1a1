//! Main token issuer implementation

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPair, TokenType};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};

use super::config::TokenIssuerConfig;

/// Signs and verifies access and refresh tokens
///
/// Stateless: it never touches the session store. Whether a verified
/// refresh token is still the live one is the auth service's question.
pub struct TokenIssuer {
    config: TokenIssuerConfig,
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    /// Creates a new token issuer
    pub fn new(config: TokenIssuerConfig) -> Self {
        let access_encoding_key = EncodingKey::from_secret(config.access_secret.as_bytes());
        let access_decoding_key = DecodingKey::from_secret(config.access_secret.as_bytes());
        let refresh_encoding_key = EncodingKey::from_secret(config.refresh_secret.as_bytes());
        let refresh_decoding_key = DecodingKey::from_secret(config.refresh_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            config,
            access_encoding_key,
            access_decoding_key,
            refresh_encoding_key,
            refresh_decoding_key,
            validation,
        }
    }

    /// Access token lifetime in seconds
    pub fn access_ttl_seconds(&self) -> i64 {
        self.config.access_ttl_seconds
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.config.refresh_ttl_seconds
    }

    /// Issues an access token carrying the user's public identity
    pub fn issue_access_token(&self, user: &User) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(
            user,
            self.config.access_ttl_seconds,
            &self.config.issuer,
            &self.config.audience,
        );
        self.encode_jwt(&claims, &self.access_encoding_key)
    }

    /// Issues a refresh token carrying only the subject
    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<String, DomainError> {
        let claims = Claims::new_refresh_token(
            user_id,
            self.config.refresh_ttl_seconds,
            &self.config.issuer,
            &self.config.audience,
        );
        self.encode_jwt(&claims, &self.refresh_encoding_key)
    }

    /// Issues a fresh access/refresh pair
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, DomainError> {
        Ok(TokenPair::new(
            self.issue_access_token(user)?,
            self.issue_refresh_token(user.id)?,
            self.config.access_ttl_seconds,
            self.config.refresh_ttl_seconds,
        ))
    }

    /// Verifies an access token and returns the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError::TokenExpired)` - Past expiry
    /// * `Err(TokenError::*)` - Any other failure (signature, structure, claims)
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.decode_jwt(token, &self.access_decoding_key, TokenType::Access)
    }

    /// Verifies a refresh token and returns the subject id
    ///
    /// Same error split as [`verify_access_token`](Self::verify_access_token).
    pub fn verify_refresh_token(&self, token: &str) -> Result<Uuid, DomainError> {
        let claims = self.decode_jwt(token, &self.refresh_decoding_key, TokenType::Refresh)?;
        claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))
    }

    fn encode_jwt(&self, claims: &Claims, key: &EncodingKey) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, key).map_err(|e| {
            tracing::error!(error = %e, "failed to sign token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    fn decode_jwt(
        &self,
        token: &str,
        key: &DecodingKey,
        expected: TokenType,
    ) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, key, &self.validation)
            .map_err(|e| DomainError::Token(map_jwt_error(e.kind())))?;

        if token_data.claims.token_type != expected {
            return Err(DomainError::Token(TokenError::WrongTokenType));
        }

        Ok(token_data.claims)
    }
}

fn map_jwt_error(kind: &JwtErrorKind) -> TokenError {
    match kind {
        JwtErrorKind::ExpiredSignature => TokenError::TokenExpired,
        JwtErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
        JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
        JwtErrorKind::InvalidIssuer
        | JwtErrorKind::InvalidAudience
        | JwtErrorKind::InvalidSubject
        | JwtErrorKind::MissingRequiredClaim(_)
        | JwtErrorKind::Json(_) => TokenError::InvalidClaims,
        _ => TokenError::InvalidTokenFormat,
    }
}
