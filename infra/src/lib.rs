//! # Infrastructure Layer
//!
//! Concrete implementations of the StreamVault repository traits.
//!
//! ## Architecture
//!
//! - **Database**: MySQL user repository and session store using SQLx
//! - **Memory**: in-process user repository and session store for
//!   development and tests
//! - **Storage**: filesystem object storage for uploaded profile images
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use sv_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// In-memory repositories
pub mod memory;

/// Upload storage
pub mod storage;

pub use memory::{InMemorySessionStore, InMemoryUserRepository};
pub use storage::FsObjectStorage;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err)
    }
}
