//! # StreamVault Core
//!
//! Core business logic and domain layer for StreamVault accounts.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types for credential verification and the dual-token session
//! lifecycle.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
