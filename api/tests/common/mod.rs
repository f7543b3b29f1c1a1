//! Shared setup for the HTTP integration tests
#![allow(dead_code)]

use actix_web::{cookie::Cookie, dev::ServiceResponse, test, web};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

use sv_api::{AppState, SessionTransport};
use sv_core::services::{
    AuthService, AuthServiceConfig, BcryptPasswordHasher, TokenIssuer, TokenIssuerConfig,
};
use sv_infra::{FsObjectStorage, InMemorySessionStore, InMemoryUserRepository};
use sv_shared::config::{JwtConfig, SessionConfig};

pub const PASSWORD: &str = "correct horse battery";
pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";

pub type State = web::Data<AppState<InMemoryUserRepository, InMemorySessionStore>>;

/// Everything a test needs to drive the app and inspect the stores
pub struct TestContext {
    pub state: State,
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<InMemorySessionStore>,
    pub issuer: Arc<TokenIssuer>,
    pub temp_dir: TempDir,
    pub upload_dir: TempDir,
}

pub fn context() -> TestContext {
    context_with(AuthServiceConfig::default())
}

pub fn context_with(config: AuthServiceConfig) -> TestContext {
    let users = Arc::new(InMemoryUserRepository::new());
    let sessions = Arc::new(InMemorySessionStore::new());
    let issuer = Arc::new(TokenIssuer::new(TokenIssuerConfig::from(&JwtConfig::new(
        "integration-access-secret",
        "integration-refresh-secret",
    ))));
    let temp_dir = TempDir::new().unwrap();
    let upload_dir = TempDir::new().unwrap();

    let auth_service = AuthService::new(
        Arc::clone(&users),
        Arc::clone(&sessions),
        Arc::clone(&issuer),
        Arc::new(BcryptPasswordHasher::new(4)),
        config,
    )
    .with_object_storage(Arc::new(FsObjectStorage::new(
        upload_dir.path(),
        "https://cdn.streamvault.test/uploads",
    )));

    let state = web::Data::new(AppState {
        auth_service: Arc::new(auth_service),
        transport: SessionTransport::new(SessionConfig::default()),
        upload_temp_dir: temp_dir.path().to_path_buf(),
    });

    TestContext {
        state,
        users,
        sessions,
        issuer,
        temp_dir,
        upload_dir,
    }
}

pub fn register_request(username: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(json!({
            "full_name": format!("{} Example", username),
            "email": format!("{}@example.com", username),
            "username": username,
            "password": PASSWORD,
        }))
}

pub fn login_request(username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({ "username": username, "password": password }))
}

pub fn refresh_with_cookie(refresh_token: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/users/refresh-token")
        .cookie(Cookie::new(REFRESH_COOKIE, refresh_token.to_string()))
}

pub fn refresh_with_body(refresh_token: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/users/refresh-token")
        .set_json(json!({ "refresh_token": refresh_token }))
}

pub fn with_access_cookie(req: test::TestRequest, access_token: &str) -> test::TestRequest {
    req.cookie(Cookie::new(ACCESS_COOKIE, access_token.to_string()))
}

/// Value of a cookie set on the response
pub fn cookie_value<B>(resp: &ServiceResponse<B>, name: &str) -> Option<String> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

/// Whether the response sets `name` with both HttpOnly and Secure
pub fn cookie_is_locked_down<B>(resp: &ServiceResponse<B>, name: &str) -> bool {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map_or(false, |c| c.http_only() == Some(true) && c.secure() == Some(true))
}

pub fn error_code(body: &Value) -> &str {
    body["error"].as_str().unwrap_or_default()
}
