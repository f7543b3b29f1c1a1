//! JWT authentication middleware for protecting API endpoints.
//!
//! The access token is taken from the access cookie or, failing that, from
//! an `Authorization: Bearer` header. A verified token puts an
//! [`AuthContext`] into the request extensions for handlers to extract.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use sv_core::{
    domain::entities::token::Claims,
    errors::{AuthError, DomainError, TokenError},
    services::token::TokenIssuer,
};

use crate::handlers::error::handle_domain_error;
use crate::transport::SessionTransport;

/// Authenticated caller, as established by a verified access token
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: Uuid,
    /// Username carried in the access token
    pub username: Option<String>,
    /// JWT ID for tracking
    pub jti: String,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;
        Ok(Self {
            user_id,
            username: claims.username,
            jti: claims.jti,
        })
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    issuer: Arc<TokenIssuer>,
    transport: SessionTransport,
}

impl JwtAuth {
    pub fn new(issuer: Arc<TokenIssuer>, transport: SessionTransport) -> Self {
        Self { issuer, transport }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            issuer: Arc::clone(&self.issuer),
            transport: self.transport.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    issuer: Arc<TokenIssuer>,
    transport: SessionTransport,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verified = authenticate(&self.issuer, &self.transport, req.request());

        Box::pin(async move {
            match verified {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(e) => Ok(req
                    .into_response(handle_domain_error(e))
                    .map_into_right_body()),
            }
        })
    }
}

fn authenticate(
    issuer: &TokenIssuer,
    transport: &SessionTransport,
    req: &HttpRequest,
) -> Result<AuthContext, DomainError> {
    let token = transport
        .extract_access_token(req)
        .ok_or(AuthError::Unauthenticated)?;
    let claims = issuer.verify_access_token(&token)?;
    AuthContext::from_claims(claims)
}

fn unauthorized(error: DomainError) -> Error {
    let message = error.to_string();
    InternalError::from_response(message, handle_domain_error(error)).into()
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| unauthorized(AuthError::Unauthenticated.into()));

        ready(result)
    }
}
