use actix_web::{web, HttpResponse};
use validator::Validate;

use sv_core::domain::value_objects::RegisterInput;
use sv_core::repositories::{SessionStore, UserRepository};
use sv_shared::types::ApiResponse;

use crate::dto::auth::RegisterRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/users/register
///
/// `avatar` and `cover_image` name files already staged in the upload temp
/// directory; they are moved to object storage and the staged copies removed.
///
/// ## Errors
/// - 400 Bad Request: Blank or malformed field, or avatar upload failed
/// - 409 Conflict: Username or email already taken
pub async fn register<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let staged = |name: Option<String>| name.map(|n| state.upload_temp_dir.join(n));
    let input = RegisterInput {
        avatar_path: staged(request.avatar),
        cover_image_path: staged(request.cover_image),
        full_name: request.full_name,
        email: request.email,
        username: request.username,
        password: request.password,
    };

    match state.auth_service.register(input).await {
        Ok(profile) => HttpResponse::Created()
            .json(ApiResponse::success(profile, "User registered successfully")),
        Err(error) => handle_domain_error(error),
    }
}
