//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod credentials;

// Re-export commonly used types
pub use auth_response::LoginResult;
pub use credentials::{
    check_password_length, ChangePasswordInput, LoginInput, RegisterInput, MAX_PASSWORD_BYTES,
};
