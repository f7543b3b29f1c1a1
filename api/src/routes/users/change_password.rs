use actix_web::{web, HttpResponse};
use validator::Validate;

use sv_core::repositories::{SessionStore, UserRepository};
use sv_shared::types::ApiResponse;

use crate::dto::auth::ChangePasswordRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /api/v1/users/change-password
pub async fn change_password<U, S>(
    state: web::Data<AppState<U, S>>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .auth_service
        .change_password(auth.user_id, request.into())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::message("Password changed successfully")),
        Err(error) => handle_domain_error(error),
    }
}
