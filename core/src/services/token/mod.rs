//! Token issuer module for JWT management
//!
//! This module handles all token-related operations including:
//! - Access token generation and verification
//! - Refresh token generation and verification
//!
//! Both token kinds are HS256 JWTs signed with independent secrets.

mod config;
mod service;


pub use config::TokenIssuerConfig;
pub use service::TokenIssuer;
