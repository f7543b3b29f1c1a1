//! Shared utilities and common types for the StreamVault server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the process environment
//! - Error response structures
//! - API response wrappers

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    ServerConfig, SessionConfig, StorageBackend, StorageConfig,
};
pub use errors::ErrorResponse;
pub use types::{ApiResponse, HealthResponse};
