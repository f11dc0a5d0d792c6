//! Bearer and basic authentication gates.
//!
//! The bearer gate is an extractor: handlers and the role middleware
//! pull an [`AuthUser`] out of the request, which validates the
//! `Authorization: Bearer` header against the access-token secret. A
//! verified principal is cached in the request extensions so the check
//! runs at most once per request.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::convert::Infallible;
use uuid::Uuid;

use crate::config::basic_auth::BasicAuthConfig;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{Claims, TokenType, verify_token};

/// Extractor providing the authenticated principal's claims.
///
/// Rejects with 401 when the header is missing, not bearer-shaped, or
/// carries an invalid token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The principal's user id, parsed from the token subject.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.user_id)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))
    }
}

fn bearer_claims(parts: &mut Parts, state: &AppState) -> Result<Claims, AppError> {
    // A gate earlier in the chain may already have verified the token.
    if let Some(claims) = parts.extensions.get::<Claims>() {
        return Ok(claims.clone());
    }

    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Authorization header missing or invalid"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Authorization header missing or invalid"))?;

    verify_token(token, TokenType::Access, &state.jwt_config)
        .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        bearer_claims(parts, state).map(AuthUser)
    }
}

/// Optional variant of the bearer gate for endpoints with optional
/// personalization: any failure falls through silently with no
/// principal attached.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<Claims>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(bearer_claims(parts, state).ok()))
    }
}

fn check_basic_credentials(headers: &HeaderMap, config: &BasicAuthConfig) -> Result<(), AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Authorization header is required"))?;

    let encoded = auth_header
        .strip_prefix("Basic ")
        .ok_or_else(|| AppError::unauthorized("Basic authentication is required"))?;

    let (username, password) = match (&config.username, &config.password) {
        (Some(username), Some(password)) => (username, password),
        _ => return Err(AppError::misconfigured("Authentication configuration is missing")),
    };

    let decoded = BASE64
        .decode(encoded)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    match decoded.split_once(':') {
        Some((user, pass)) if user == username && pass == password => Ok(()),
        _ => Err(AppError::unauthorized("Invalid credentials")),
    }
}

/// HTTP basic auth gate for operational endpoints.
pub async fn basic_auth(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match check_basic_credentials(req.headers(), &state.basic_auth_config) {
        Ok(()) => next.run(req).await,
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    fn configured() -> BasicAuthConfig {
        BasicAuthConfig {
            username: Some("ops".to_string()),
            password: Some("hunter2".to_string()),
        }
    }

    fn headers_with_authorization(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_basic_missing_header() {
        let err = check_basic_credentials(&HeaderMap::new(), &configured()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Authorization header is required");
    }

    #[test]
    fn test_basic_wrong_scheme() {
        let headers = headers_with_authorization("Bearer abc");
        let err = check_basic_credentials(&headers, &configured()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Basic authentication is required");
    }

    #[test]
    fn test_basic_missing_server_configuration() {
        let headers = headers_with_authorization("Basic b3BzOmh1bnRlcjI=");
        let config = BasicAuthConfig {
            username: None,
            password: None,
        };
        let err = check_basic_credentials(&headers, &config).unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Authentication configuration is missing");
    }

    #[test]
    fn test_basic_valid_credentials() {
        // base64("ops:hunter2")
        let headers = headers_with_authorization("Basic b3BzOmh1bnRlcjI=");
        assert!(check_basic_credentials(&headers, &configured()).is_ok());
    }

    #[test]
    fn test_basic_wrong_credentials() {
        // base64("ops:wrong")
        let headers = headers_with_authorization("Basic b3BzOndyb25n");
        let err = check_basic_credentials(&headers, &configured()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Invalid credentials");
    }

    #[test]
    fn test_basic_malformed_base64() {
        let headers = headers_with_authorization("Basic %%%%");
        let err = check_basic_credentials(&headers, &configured()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Invalid credentials");
    }
}
