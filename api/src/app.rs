//! Application factory
//!
//! Builds the actix-web `App` around a shared [`AppState`]. The app is
//! generic over the persistence backend so the binary can pick MySQL or the
//! in-memory implementations at startup and tests can use the latter.

use actix_web::{middleware::Logger, web, App, HttpResponse};
use std::sync::Arc;

use sv_core::repositories::{SessionStore, UserRepository};
use sv_shared::config::Environment;
use sv_shared::errors::{error_codes, ErrorResponse};
use sv_shared::types::HealthResponse;

use crate::handlers::error::json_error_handler;
use crate::middleware::{auth::JwtAuth, cors::create_cors, security::SecurityMiddleware};
use crate::routes::users::{
    change_password, current_user, login, logout, refresh_token, register, AppState,
};

/// HTTP-level settings that do not belong to the account handlers
#[derive(Debug, Clone, Default)]
pub struct HttpSettings {
    pub environment: Environment,
    pub cors_origins: Vec<String>,
}

/// Create and configure the application with all dependencies
pub fn create_app<U, S>(
    app_state: web::Data<AppState<U, S>>,
    settings: HttpSettings,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    let jwt_auth = JwtAuth::new(
        Arc::clone(app_state.auth_service.token_issuer()),
        app_state.transport.clone(),
    );

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Registered last, runs first: security, then CORS, then logging
        .wrap(Logger::default())
        .wrap(create_cors(settings.environment, &settings.cors_origins))
        .wrap(SecurityMiddleware::for_environment(settings.environment))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1/users")
                .route("/register", web::post().to(register::<U, S>))
                .route("/login", web::post().to(login::<U, S>))
                .route("/refresh-token", web::post().to(refresh_token::<U, S>))
                .route(
                    "/logout",
                    web::post().to(logout::<U, S>).wrap(jwt_auth.clone()),
                )
                .route(
                    "/change-password",
                    web::post().to(change_password::<U, S>).wrap(jwt_auth.clone()),
                )
                .route(
                    "/current-user",
                    web::get().to(current_user::<U, S>).wrap(jwt_auth),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
