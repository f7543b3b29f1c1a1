//! Input structs for the account operations.
//!
//! Each operation takes exactly one of these. They are checked once, at the
//! start of the operation, and the service works with the normalized values
//! from then on.

use std::path::PathBuf;

use crate::errors::ValidationError;

/// Longest password accepted, in bytes
///
/// bcrypt ignores everything past its 72nd input byte.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Reject a password longer than [`MAX_PASSWORD_BYTES`]
pub fn check_password_length(field: &str, password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::InvalidLength {
            field: field.to_string(),
            min: 1,
            max: MAX_PASSWORD_BYTES,
        });
    }
    Ok(())
}

/// Login by username or email
#[derive(Clone, Default)]
pub struct LoginInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

impl LoginInput {
    /// Normalized identifiers; at least one must be present
    pub fn identifiers(&self) -> Result<(Option<String>, Option<String>), ValidationError> {
        let username = non_blank(self.username.as_deref()).map(str::to_lowercase);
        let email = non_blank(self.email.as_deref()).map(str::to_lowercase);

        if username.is_none() && email.is_none() {
            return Err(ValidationError::required("username or email"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::required("password"));
        }

        Ok((username, email))
    }
}

impl std::fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginInput")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// New account registration
#[derive(Clone, Default)]
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,

    /// Local path of an uploaded avatar image
    pub avatar_path: Option<PathBuf>,

    /// Local path of an uploaded cover image
    pub cover_image_path: Option<PathBuf>,
}

impl RegisterInput {
    /// Reject blank text fields and lower-case the username and email
    pub fn normalized(mut self) -> Result<Self, ValidationError> {
        for (field, value) in [
            ("full_name", &self.full_name),
            ("email", &self.email),
            ("username", &self.username),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::required(field));
            }
        }

        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        check_password_length("password", &self.password)?;

        self.full_name = self.full_name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self.username = self.username.trim().to_lowercase();
        Ok(self)
    }
}

impl std::fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterInput")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("avatar_path", &self.avatar_path)
            .field("cover_image_path", &self.cover_image_path)
            .finish_non_exhaustive()
    }
}

/// Password change for an authenticated subject
#[derive(Clone, Default)]
pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
}

impl ChangePasswordInput {
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.old_password.is_empty() {
            return Err(ValidationError::required("old_password"));
        }
        if self.new_password.trim().is_empty() {
            return Err(ValidationError::required("new_password"));
        }
        check_password_length("new_password", &self.new_password)
    }
}

impl std::fmt::Debug for ChangePasswordInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordInput").finish_non_exhaustive()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
