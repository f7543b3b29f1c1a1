//! Domain-specific error types for authentication and related operations
//!
//! This module provides error type definitions for authentication, token
//! management, and validation operations. HTTP status mapping lives in the
//! presentation layer; here every error only knows its [`ErrorKind`].

use thiserror::Error;

/// Coarse classification of every failure the domain can report.
///
/// Each kind has a stable, client-visible code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Conflict,
    InvalidCredentials,
    TokenInvalid,
    TokenExpired,
    SessionRevoked,
    Unauthenticated,
    Internal,
}

impl ErrorKind {
    /// Stable error code for client identification
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorKind::TokenInvalid => "TOKEN_INVALID",
            ErrorKind::TokenExpired => "TOKEN_EXPIRED",
            ErrorKind::SessionRevoked => "SESSION_REVOKED",
            ErrorKind::Unauthenticated => "UNAUTHENTICATED",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller failed to prove who they are
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidCredentials
                | ErrorKind::TokenInvalid
                | ErrorKind::TokenExpired
                | ErrorKind::SessionRevoked
                | ErrorKind::Unauthenticated
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User does not exist")]
    UserNotFound,

    #[error("User with email or username already exists")]
    UserAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Refresh token is expired or used")]
    SessionRevoked,

    #[error("Unauthorized request")]
    Unauthenticated,
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UserAlreadyExists => ErrorKind::Conflict,
            AuthError::InvalidCredentials => ErrorKind::InvalidCredentials,
            AuthError::SessionRevoked => ErrorKind::SessionRevoked,
            AuthError::Unauthenticated => ErrorKind::Unauthenticated,
        }
    }
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Wrong token type")]
    WrongTokenType,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenError::TokenExpired => ErrorKind::TokenExpired,
            TokenError::TokenGenerationFailed => ErrorKind::Internal,
            TokenError::InvalidTokenFormat
            | TokenError::InvalidSignature
            | TokenError::TokenNotYetValid
            | TokenError::InvalidClaims
            | TokenError::WrongTokenType => ErrorKind::TokenInvalid,
        }
    }
}

/// Validation errors
///
/// These errors represent input validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (min: {min}, max: {max})")]
    InvalidLength { field: String, min: usize, max: usize },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Upload failed: {field}")]
    UploadFailed { field: String },
}

impl ValidationError {
    /// Shorthand for a missing or blank field
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::RequiredField {
            field: field.into(),
        }
    }
}
