//! MySQL repository implementations

mod session_store_impl;
mod user_repository_impl;

pub use session_store_impl::MySqlSessionStore;
pub use user_repository_impl::MySqlUserRepository;

use sv_core::errors::DomainError;

/// Wrap a driver failure without leaking it past the domain boundary
pub(crate) fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "{}", context);
    DomainError::internal(format!("{}: {}", context, err))
}
