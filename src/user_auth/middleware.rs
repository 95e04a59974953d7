//! Session guard middleware.
//!
//! Per request: Unauthenticated -> TokenPresent -> {Verified, Rejected};
//! Verified -> {Authorized, Forbidden} when a role gate applies. A missing
//! token and an invalid/expired token are rejected with distinct codes,
//! both before any handler logic runs.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::error::{AuthError, TokenError};
use super::roles;
use super::token::Claims;
use crate::gateway::state::AppState;

/// Pull the bearer token out of the Authorization header.
///
/// Missing header is `MissingToken`; a present header that is not
/// `Bearer <token>` is a malformed token.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::Token(TokenError::Malformed))?;

    if token.is_empty() {
        return Err(AuthError::Token(TokenError::Malformed));
    }
    Ok(token)
}

/// Verify the bearer token and attach its claims to the request.
///
/// On success the downstream handler reads the claims via
/// `Extension<Claims>`; they live only for this request.
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer(request.headers())?;
    let claims = state.user_auth.verify_token(token)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Role intersection check. Pure; no I/O.
pub fn authorize(claims: &Claims, allowed: &[&str]) -> Result<(), AuthError> {
    if claims.roles.iter().any(|r| allowed.contains(&r.as_str())) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

/// Clerk-only gate. Layered after `jwt_auth_middleware`, so verified
/// claims are already in the request extensions.
pub async fn clerk_guard(request: Request<Body>, next: Next) -> Result<Response, AuthError> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or(AuthError::MissingToken)?;
    authorize(claims, roles::CLERK_ONLY)?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn claims_with_roles(roles: &[&str]) -> Claims {
        Claims {
            sub: "00000000-0000-0000-0000-000000000000".to_string(),
            username: "alice".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn test_authorize_role_intersects() {
        let claims = claims_with_roles(&["nurse", "clerk"]);
        assert!(authorize(&claims, &["clerk"]).is_ok());
        assert!(authorize(&claims, &["clerk", "admin"]).is_ok());
    }

    #[test]
    fn test_authorize_disjoint_roles_forbidden() {
        let claims = claims_with_roles(&["nurse"]);
        assert!(matches!(
            authorize(&claims, &["clerk"]),
            Err(AuthError::Forbidden)
        ));
    }

    #[test]
    fn test_extract_bearer_ok() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(extract_bearer(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_extract_bearer_missing_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_bearer(&headers),
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_extract_bearer_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert!(matches!(
            extract_bearer(&headers),
            Err(AuthError::Token(TokenError::Malformed))
        ));
    }

    #[test]
    fn test_extract_bearer_empty_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(matches!(
            extract_bearer(&headers),
            Err(AuthError::Token(TokenError::Malformed))
        ));
    }
}
