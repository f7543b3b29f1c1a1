//! Binding issued tokens to the caller.
//!
//! Tokens travel as cookies that are always `HttpOnly` and `Secure`; the
//! refresh token may also arrive in a JSON body and the access token in an
//! `Authorization: Bearer` header.

use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    http::header::AUTHORIZATION,
    HttpRequest, HttpResponseBuilder,
};

use sv_core::domain::entities::token::TokenPair;
use sv_shared::config::SessionConfig;

/// Cookie and header handling for session tokens
#[derive(Debug, Clone)]
pub struct SessionTransport {
    config: SessionConfig,
    same_site: SameSite,
}

impl SessionTransport {
    pub fn new(config: SessionConfig) -> Self {
        let same_site = parse_same_site(&config.same_site);
        Self { config, same_site }
    }

    pub fn access_cookie_name(&self) -> &str {
        &self.config.access_cookie_name
    }

    pub fn refresh_cookie_name(&self) -> &str {
        &self.config.refresh_cookie_name
    }

    /// Set both token cookies on the response
    pub fn attach(&self, response: &mut HttpResponseBuilder, pair: &TokenPair) {
        response.cookie(self.cookie(
            &self.config.access_cookie_name,
            pair.access_token.clone(),
            Duration::seconds(pair.access_expires_in),
        ));
        response.cookie(self.cookie(
            &self.config.refresh_cookie_name,
            pair.refresh_token.clone(),
            Duration::seconds(pair.refresh_expires_in),
        ));
    }

    /// Expire both token cookies
    pub fn clear(&self, response: &mut HttpResponseBuilder) {
        for name in [&self.config.access_cookie_name, &self.config.refresh_cookie_name] {
            response.cookie(self.cookie(name, String::new(), Duration::ZERO));
        }
    }

    /// Refresh token from the cookie, falling back to the body field
    pub fn extract_refresh_token(&self, req: &HttpRequest, body: Option<&str>) -> Option<String> {
        req.cookie(&self.config.refresh_cookie_name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
            .or_else(|| body.filter(|v| !v.is_empty()).map(str::to_string))
    }

    /// Access token from the cookie, falling back to a bearer header
    pub fn extract_access_token(&self, req: &HttpRequest) -> Option<String> {
        req.cookie(&self.config.access_cookie_name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
            .or_else(|| extract_bearer_token(req))
    }

    fn cookie(&self, name: &str, value: String, max_age: Duration) -> Cookie<'static> {
        Cookie::build(name.to_string(), value)
            .path(self.config.path.clone())
            .http_only(true)
            .secure(true)
            .same_site(self.same_site)
            .max_age(max_age)
            .finish()
    }
}

/// Extracts Bearer token from Authorization header
pub fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
}

fn parse_same_site(raw: &str) -> SameSite {
    match raw.to_ascii_lowercase().as_str() {
        "lax" => SameSite::Lax,
        "none" => SameSite::None,
        _ => SameSite::Strict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, HttpResponse};

    fn transport() -> SessionTransport {
        SessionTransport::new(SessionConfig::default())
    }

    fn pair() -> TokenPair {
        TokenPair::new("access.jwt".to_string(), "refresh.jwt".to_string(), 900, 864_000)
    }

    #[test]
    fn test_attach_sets_secure_http_only_cookies() {
        let mut builder = HttpResponse::Ok();
        transport().attach(&mut builder, &pair());
        let response = builder.finish();

        let cookies: Vec<_> = response.cookies().collect();
        assert_eq!(cookies.len(), 2);
        for cookie in &cookies {
            assert_eq!(cookie.http_only(), Some(true));
            assert_eq!(cookie.secure(), Some(true));
            assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        }

        let refresh = cookies.iter().find(|c| c.name() == "refreshToken").unwrap();
        assert_eq!(refresh.value(), "refresh.jwt");
        assert_eq!(refresh.max_age(), Some(Duration::seconds(864_000)));
    }

    #[test]
    fn test_clear_expires_both_cookies() {
        let mut builder = HttpResponse::Ok();
        transport().clear(&mut builder);
        let response = builder.finish();

        let cookies: Vec<_> = response.cookies().collect();
        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().all(|c| c.value().is_empty()));
        assert!(cookies.iter().all(|c| c.max_age() == Some(Duration::ZERO)));
    }

    #[test]
    fn test_refresh_token_prefers_cookie() {
        let t = transport();

        let req = actix_test::TestRequest::default()
            .cookie(Cookie::new("refreshToken", "from-cookie"))
            .to_http_request();
        assert_eq!(
            t.extract_refresh_token(&req, Some("from-body")).as_deref(),
            Some("from-cookie")
        );

        let req = actix_test::TestRequest::default().to_http_request();
        assert_eq!(
            t.extract_refresh_token(&req, Some("from-body")).as_deref(),
            Some("from-body")
        );
        assert_eq!(t.extract_refresh_token(&req, Some("")), None);
        assert_eq!(t.extract_refresh_token(&req, None), None);
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req), None);

        let req = actix_test::TestRequest::default().to_http_request();
        assert_eq!(extract_bearer_token(&req), None);
    }

    #[test]
    fn test_access_token_cookie_then_header() {
        let t = transport();
        let req = actix_test::TestRequest::default()
            .cookie(Cookie::new("accessToken", "cookie-token"))
            .insert_header((AUTHORIZATION, "Bearer header-token"))
            .to_http_request();
        assert_eq!(t.extract_access_token(&req).as_deref(), Some("cookie-token"));

        let req = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer header-token"))
            .to_http_request();
        assert_eq!(t.extract_access_token(&req).as_deref(), Some("header-token"));
    }

    #[test]
    fn test_same_site_parsing() {
        assert_eq!(parse_same_site("Lax"), SameSite::Lax);
        assert_eq!(parse_same_site("none"), SameSite::None);
        assert_eq!(parse_same_site("bogus"), SameSite::Strict);
    }
}
