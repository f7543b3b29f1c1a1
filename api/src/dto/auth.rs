use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use sv_core::domain::entities::token::TokenPair;
use sv_core::domain::entities::user::UserProfile;
use sv_core::domain::value_objects::{ChangePasswordInput, LoginInput, LoginResult};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 64))]
    pub username: String,

    #[validate(length(min = 1, max = 72))]
    pub password: String,

    /// Name of a staged file in the upload temp directory
    #[validate(custom = "validate_staged_name")]
    pub avatar: Option<String>,

    /// Name of a staged file in the upload temp directory
    #[validate(custom = "validate_staged_name")]
    pub cover_image: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_login_identifiers"))]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[validate(length(min = 1))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        LoginInput {
            username: req.username,
            email: req.email,
            password: req.password,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub old_password: String,

    #[validate(length(min = 1, max = 72))]
    pub new_password: String,
}

impl From<ChangePasswordRequest> for ChangePasswordInput {
    fn from(req: ChangePasswordRequest) -> Self {
        ChangePasswordInput {
            old_password: req.old_password,
            new_password: req.new_password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            user: result.user,
            access_token: result.tokens.access_token,
            refresh_token: result.tokens.refresh_token,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<&TokenPair> for TokenResponse {
    fn from(pair: &TokenPair) -> Self {
        Self {
            access_token: pair.access_token.clone(),
            refresh_token: pair.refresh_token.clone(),
        }
    }
}

fn validate_staged_name(name: &str) -> Result<(), ValidationError> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0']);
    if plain {
        Ok(())
    } else {
        Err(ValidationError::new("staged_file_name"))
    }
}

fn validate_login_identifiers(req: &LoginRequest) -> Result<(), ValidationError> {
    let present = |v: &Option<String>| v.as_deref().map_or(false, |s| !s.trim().is_empty());
    if present(&req.username) || present(&req.email) {
        Ok(())
    } else {
        Err(ValidationError::new("username_or_email_required"))
    }
}
