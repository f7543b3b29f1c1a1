//! Domain entities representing core business objects.

pub mod session;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use session::SessionState;
pub use token::{Claims, TokenPair, TokenType};
pub use user::{User, UserProfile};
