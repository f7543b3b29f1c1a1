//! Authentication service module
//!
//! This module provides the account and session lifecycle:
//! - Registration with optional profile image upload
//! - Login by username or email
//! - Refresh token rotation with replay detection
//! - Logout and password change

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
