//! StreamVault HTTP surface
//!
//! Route handlers, middleware and the session cookie transport, exported
//! as a library so integration tests can build the same app the binary
//! serves.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod transport;

pub use app::{create_app, HttpSettings};
pub use routes::users::AppState;
pub use transport::SessionTransport;
