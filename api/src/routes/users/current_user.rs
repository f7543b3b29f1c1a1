use actix_web::{web, HttpResponse};

use sv_core::repositories::{SessionStore, UserRepository};
use sv_shared::types::ApiResponse;

use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for GET /api/v1/users/current-user
pub async fn current_user<U, S>(state: web::Data<AppState<U, S>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    match state.auth_service.current_user(auth.user_id).await {
        Ok(profile) => HttpResponse::Ok().json(ApiResponse::success(
            profile,
            "Current user fetched successfully",
        )),
        Err(error) => handle_domain_error(error),
    }
}
