use actix_web::{web, HttpRequest, HttpResponse};

use sv_core::repositories::{SessionStore, UserRepository};
use sv_shared::types::ApiResponse;

use crate::dto::auth::{RefreshTokenRequest, TokenResponse};
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /api/v1/users/refresh-token
///
/// The refresh token comes from the refresh cookie or, failing that, the
/// `refresh_token` body field. The body is optional.
///
/// ## Errors
/// - 401 Unauthorized: No token, bad or expired token, or a token that is
///   no longer the live session
pub async fn refresh_token<U, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, S>>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    let from_body = body.and_then(|b| b.into_inner().refresh_token);
    let presented = state
        .transport
        .extract_refresh_token(&req, from_body.as_deref());

    match state.auth_service.refresh_session(presented.as_deref()).await {
        Ok(pair) => {
            let mut response = HttpResponse::Ok();
            state.transport.attach(&mut response, &pair);
            response.json(ApiResponse::success(
                TokenResponse::from(&pair),
                "Access token refreshed",
            ))
        }
        Err(error) => handle_domain_error(error),
    }
}
