use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::UserRole;
use crate::utils::jwt::TokenPair;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    /// Defaults to `student` when omitted.
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

/// Token payload returned from sign-in and refresh.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignInResponse {
    pub name: String,
    pub email: String,
    pub role: Option<UserRole>,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// Access-token lifetime in seconds.
    pub expires_in: i64,
    /// Unix timestamp at which the access token expires.
    pub expires_on: i64,
    pub access_token: String,
    pub refresh_token: String,
}

impl SignInResponse {
    pub fn new(
        name: String,
        email: String,
        role: Option<UserRole>,
        pair: TokenPair,
        jwt_config: &JwtConfig,
    ) -> Self {
        let expires_in = jwt_config.access_expires_in;
        Self {
            name,
            email,
            role,
            token_type: "Bearer".to_string(),
            expires_in,
            expires_on: Utc::now().timestamp() + expires_in,
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_validation() {
        let valid = SignUpRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "long-enough-password".to_string(),
            role: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = SignUpRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = SignUpRequest {
            password: "short".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_sign_in_response_shape() {
        let config = JwtConfig {
            access_secret: "s".to_string(),
            refresh_secret: "r".to_string(),
            access_expires_in: 3600,
            refresh_expires_in: 604800,
        };
        let pair = TokenPair {
            access_token: "a.b.c".to_string(),
            refresh_token: "d.e.f".to_string(),
        };

        let response = SignInResponse::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            Some(UserRole::Student),
            pair,
            &config,
        );

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 3600);
        assert!(response.expires_on > Utc::now().timestamp());
    }
}
