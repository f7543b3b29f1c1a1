use actix_web::{web, HttpResponse};
use validator::Validate;

use sv_core::repositories::{SessionStore, UserRepository};
use sv_shared::types::ApiResponse;

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/users/login
///
/// Sets both token cookies and echoes the tokens in the body.
///
/// ## Errors
/// - 400 Bad Request: Neither username nor email supplied
/// - 404 Not Found: No such user
/// - 401 Unauthorized: Wrong password
pub async fn login<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.auth_service.login(request.into()).await {
        Ok(result) => {
            let mut response = HttpResponse::Ok();
            state.transport.attach(&mut response, &result.tokens);
            response.json(ApiResponse::success(
                LoginResponse::from(result),
                "User logged in successfully",
            ))
        }
        Err(error) => handle_domain_error(error),
    }
}
