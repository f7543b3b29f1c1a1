use actix_web::{web, HttpResponse};

use sv_core::repositories::{SessionStore, UserRepository};
use sv_shared::types::ApiResponse;

use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /api/v1/users/logout
///
/// Requires a valid access token. Empties the refresh slot and expires both
/// cookies; succeeds even when no session was live.
pub async fn logout<U, S>(state: web::Data<AppState<U, S>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    match state.auth_service.logout(auth.user_id).await {
        Ok(()) => {
            let mut response = HttpResponse::Ok();
            state.transport.clear(&mut response);
            response.json(ApiResponse::<()>::message("User logged out"))
        }
        Err(error) => handle_domain_error(error),
    }
}
