//! Token service: signing and verification of access and refresh JWTs.
//!
//! Access and refresh tokens use independent secrets and expiry
//! durations (see [`JwtConfig`]). Each signed token carries a fresh
//! random `tokenId` so two tokens for the same payload are never
//! identical, and a `tokenType` claim that must match the verification
//! context: a refresh token does not validate as an access token even
//! when the secrets happen to be equal.
//!
//! All verification failures collapse into a single [`TokenError`];
//! callers never see the underlying library error.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::UserRole;

/// Discriminates the two token kinds at both signing and verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims embedded in every signed token. Field names follow the wire
/// format of the public API (camelCase).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    /// Informational role snapshot taken at sign time. Authorization
    /// decisions never trust this; the role gate re-reads the user
    /// record on every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    pub token_type: TokenType,
    /// Fresh 16-byte random hex id per signing call.
    pub token_id: String,
    pub iat: usize,
    pub exp: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// Caller-supplied identity for a signing call.
#[derive(Debug, Clone, Default)]
pub struct TokenPayload {
    pub user_id: Uuid,
    pub role: Option<UserRole>,
    pub audience: Option<String>,
}

impl TokenPayload {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: None,
            audience: None,
        }
    }
}

/// Access/refresh token pair issued from one payload.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Single failure kind for all token operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Invalid or expired token")]
    Invalid,
    #[error("Failed to sign token")]
    Signing,
}

/// Generates a unique token id: 16 cryptographically random bytes,
/// hex-encoded.
pub fn generate_token_id() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn secret_for(token_type: TokenType, jwt_config: &JwtConfig) -> &str {
    match token_type {
        TokenType::Access => &jwt_config.access_secret,
        TokenType::Refresh => &jwt_config.refresh_secret,
    }
}

fn expiry_for(token_type: TokenType, jwt_config: &JwtConfig) -> i64 {
    match token_type {
        TokenType::Access => jwt_config.access_expires_in,
        TokenType::Refresh => jwt_config.refresh_expires_in,
    }
}

/// Signs a token of the given type for the payload.
pub fn sign_token(
    payload: &TokenPayload,
    token_type: TokenType,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        user_id: payload.user_id.to_string(),
        role: payload.role,
        token_type,
        token_id: generate_token_id(),
        iat: now,
        exp: now + expiry_for(token_type, jwt_config) as usize,
        aud: payload.audience.clone(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret_for(token_type, jwt_config).as_bytes()),
    )
    .map_err(|_| TokenError::Signing)
}

/// Verifies signature, expiry, and token type against the secret that
/// matches `token_type`.
pub fn verify_token(
    token: &str,
    token_type: TokenType,
    jwt_config: &JwtConfig,
) -> Result<Claims, TokenError> {
    let mut validation = Validation::default();
    // The audience claim is informational; it is not an acceptance
    // criterion for any endpoint.
    validation.validate_aud = false;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret_for(token_type, jwt_config).as_bytes()),
        &validation,
    )
    .map_err(|_| TokenError::Invalid)?;

    if data.claims.token_type != token_type {
        return Err(TokenError::Invalid);
    }

    Ok(data.claims)
}

/// Issues an access/refresh pair from one payload.
pub fn generate_token_pair(
    payload: &TokenPayload,
    jwt_config: &JwtConfig,
) -> Result<TokenPair, TokenError> {
    Ok(TokenPair {
        access_token: sign_token(payload, TokenType::Access, jwt_config)?,
        refresh_token: sign_token(payload, TokenType::Refresh, jwt_config)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            access_secret: "access-secret-for-testing-at-least-32-chars".to_string(),
            refresh_secret: "refresh-secret-for-testing-at-least-32-chars".to_string(),
            access_expires_in: 3600,
            refresh_expires_in: 604800,
        }
    }

    #[test]
    fn test_sign_and_verify_round_trip() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = sign_token(&TokenPayload::new(user_id), TokenType::Access, &config).unwrap();
        let claims = verify_token(&token, TokenType::Access, &config).unwrap();

        assert_eq!(claims.user_id, user_id.to_string());
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_id_is_fresh_per_signing_call() {
        let config = get_test_jwt_config();
        let payload = TokenPayload::new(Uuid::new_v4());

        let first = sign_token(&payload, TokenType::Access, &config).unwrap();
        let second = sign_token(&payload, TokenType::Access, &config).unwrap();

        let first_claims = verify_token(&first, TokenType::Access, &config).unwrap();
        let second_claims = verify_token(&second, TokenType::Access, &config).unwrap();

        assert_ne!(first_claims.token_id, second_claims.token_id);
        assert_eq!(first_claims.token_id.len(), 32);
    }

    #[test]
    fn test_cross_type_verification_rejected() {
        let config = get_test_jwt_config();
        let payload = TokenPayload::new(Uuid::new_v4());

        let refresh = sign_token(&payload, TokenType::Refresh, &config).unwrap();
        let result = verify_token(&refresh, TokenType::Access, &config);

        assert_eq!(result.unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn test_cross_type_rejected_even_with_shared_secret() {
        let mut config = get_test_jwt_config();
        config.refresh_secret = config.access_secret.clone();
        let payload = TokenPayload::new(Uuid::new_v4());

        let refresh = sign_token(&payload, TokenType::Refresh, &config).unwrap();
        let result = verify_token(&refresh, TokenType::Access, &config);

        assert_eq!(result.unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let config = get_test_jwt_config();
        let result = verify_token("not.a.token", TokenType::Access, &config);
        assert_eq!(result.unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let config = get_test_jwt_config();
        let token =
            sign_token(&TokenPayload::new(Uuid::new_v4()), TokenType::Access, &config).unwrap();

        let other = JwtConfig {
            access_secret: "a-completely-different-secret-also-32-chars".to_string(),
            ..get_test_jwt_config()
        };

        assert!(verify_token(&token, TokenType::Access, &other).is_err());
    }

    #[test]
    fn test_generate_token_pair() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();
        let mut payload = TokenPayload::new(user_id);
        payload.role = Some(UserRole::Student);

        let pair = generate_token_pair(&payload, &config).unwrap();

        let access = verify_token(&pair.access_token, TokenType::Access, &config).unwrap();
        let refresh = verify_token(&pair.refresh_token, TokenType::Refresh, &config).unwrap();

        assert_eq!(access.user_id, user_id.to_string());
        assert_eq!(refresh.user_id, user_id.to_string());
        assert_eq!(access.role, Some(UserRole::Student));
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn test_audience_round_trip() {
        let config = get_test_jwt_config();
        let mut payload = TokenPayload::new(Uuid::new_v4());
        payload.audience = Some("mobile".to_string());

        let token = sign_token(&payload, TokenType::Access, &config).unwrap();
        let claims = verify_token(&token, TokenType::Access, &config).unwrap();

        assert_eq!(claims.aud.as_deref(), Some("mobile"));
    }
}
