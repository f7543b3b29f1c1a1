//! In-process repositories
//!
//! Selected with `STORAGE_BACKEND=memory`. State lives for the life of the
//! process and is shared by every worker through `Arc`.

mod session_store;
mod user_repository;

pub use session_store::InMemorySessionStore;
pub use user_repository::InMemoryUserRepository;
