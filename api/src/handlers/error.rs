use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use sv_core::errors::{DomainError, ErrorKind};
use sv_shared::errors::{error_codes, ErrorResponse};

/// HTTP status for an error kind
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::InvalidCredentials
        | ErrorKind::TokenInvalid
        | ErrorKind::TokenExpired
        | ErrorKind::SessionRevoked
        | ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// Internal errors are logged in full and reported generically.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let kind = error.kind();
    let status = status_for(kind);

    let message = if kind == ErrorKind::Internal {
        log::error!("Internal error: {}", error);
        "An internal error occurred".to_string()
    } else {
        if kind.is_unauthenticated() {
            log::warn!("Request rejected: {}", kind.code());
        } else {
            log::info!("Request rejected: {}", error);
        }
        error.to_string()
    };

    HttpResponse::build(status).json(ErrorResponse::new(kind.code(), message))
}

/// 400 response listing the fields that failed validation
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();

    log::info!("Validation failed for fields: {:?}", fields);

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed")
            .add_detail("fields", fields),
    )
}

/// Malformed JSON bodies become a 400 with the standard error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    let response = HttpResponse::BadRequest()
        .json(ErrorResponse::new(error_codes::BAD_REQUEST, message.clone()));
    actix_web::error::InternalError::from_response(message, response).into()
}
