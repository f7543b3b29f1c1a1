//! Account and session route handlers
//!
//! - Registration and login
//! - Refresh token rotation
//! - Logout, password change and the current user (authenticated)

pub mod change_password;
pub mod current_user;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

use std::path::PathBuf;
use std::sync::Arc;

use sv_core::repositories::{SessionStore, UserRepository};
use sv_core::services::auth::AuthService;

use crate::transport::SessionTransport;

pub use change_password::change_password;
pub use current_user::current_user;
pub use login::login;
pub use logout::logout;
pub use refresh::refresh_token;
pub use register::register;

/// Application state shared by the account handlers
pub struct AppState<U, S>
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    pub auth_service: Arc<AuthService<U, S>>,
    pub transport: SessionTransport,
    /// Where received files wait until registration uploads them
    pub upload_temp_dir: PathBuf,
}
