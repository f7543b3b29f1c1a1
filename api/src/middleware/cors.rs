//! CORS middleware configuration for cross-origin requests.
//!
//! Session cookies are sent cross-origin, so credentials are always
//! supported. Outside production any origin is echoed back; in production
//! only the configured origins are allowed.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use sv_shared::config::Environment;

const MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance for the given environment
pub fn create_cors(environment: Environment, allowed_origins: &[String]) -> Cors {
    let base = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .supports_credentials()
        .max_age(MAX_AGE);

    if environment.is_production() {
        log::info!("Configuring CORS for production: {:?}", allowed_origins);
        allowed_origins
            .iter()
            .fold(base, |cors, origin| cors.allowed_origin(origin))
    } else if allowed_origins.is_empty() {
        log::info!("Configuring permissive CORS for {}", environment);
        base.allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(base, |cors, origin| cors.allowed_origin(origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn preflight(cors: Cors, origin: &str) -> StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(cors)
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/ping")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();
        match test::try_call_service(&app, req).await {
            Ok(resp) => resp.status(),
            Err(e) => e.as_response_error().status_code(),
        }
    }

    #[actix_web::test]
    async fn test_development_allows_any_origin() {
        let status = preflight(create_cors(Environment::Development, &[]), "http://anything.test").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_production_restricts_origins() {
        let origins = vec!["https://app.streamvault.test".to_string()];

        let allowed = preflight(
            create_cors(Environment::Production, &origins),
            "https://app.streamvault.test",
        )
        .await;
        assert_eq!(allowed, StatusCode::OK);

        let denied = preflight(
            create_cors(Environment::Production, &origins),
            "https://evil.test",
        )
        .await;
        assert_ne!(denied, StatusCode::OK);
    }
}
