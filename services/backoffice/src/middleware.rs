//! Middleware resolving the session token into a user

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session_token";

/// Pull the session token out of a request: the cookie wins, a bearer
/// `Authorization` header is the fallback for clients whose cookies are
/// blocked cross-origin.
pub fn token_from_request(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Gate a route on a resolvable, unexpired session.
///
/// Whether the token never existed or merely expired is not distinguishable
/// from the outside; both are a bare 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token =
        token_from_request(&jar, req.headers()).ok_or(ApiError::NotAuthenticated)?;

    let user = state
        .authenticator
        .resolve_session(&token)
        .await?
        .ok_or(ApiError::NotAuthenticated)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn jar_with_cookie(token: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}")).unwrap(),
        );
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn cookie_takes_priority_over_the_bearer_header() {
        let jar = jar_with_cookie("cookie-token");
        let headers = headers_with_auth("Bearer header-token");
        assert_eq!(
            token_from_request(&jar, &headers),
            Some("cookie-token".to_string())
        );
    }

    #[test]
    fn bearer_header_is_the_fallback() {
        let jar = CookieJar::new();
        let headers = headers_with_auth("Bearer header-token");
        assert_eq!(
            token_from_request(&jar, &headers),
            Some("header-token".to_string())
        );
    }

    #[test]
    fn non_bearer_authorization_is_ignored() {
        let jar = CookieJar::new();
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(token_from_request(&jar, &headers), None);
    }

    #[test]
    fn absent_credentials_yield_none() {
        assert_eq!(token_from_request(&CookieJar::new(), &HeaderMap::new()), None);
    }
}
