use sqlx::PgPool;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{User, UserRole};
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;
use crate::utils::jwt::{TokenPayload, TokenType, generate_token_pair, verify_token};
use crate::utils::password::{hash_password, verify_password};

use super::model::{RefreshRequest, SignInRequest, SignInResponse, SignUpRequest};

pub struct AuthService;

impl AuthService {
    /// Exchanges email and password for a token pair. Unknown emails
    /// and wrong passwords produce the same error.
    pub async fn sign_in(
        db: &PgPool,
        dto: SignInRequest,
        jwt_config: &JwtConfig,
    ) -> Result<SignInResponse, AppError> {
        let invalid = || AppError::unauthorized("Invalid credentials");

        let credentials = UserService::find_credentials_by_email(db, &dto.email)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&dto.password, &credentials.password)? {
            return Err(invalid());
        }

        let mut payload = TokenPayload::new(credentials.id);
        payload.role = credentials.role;

        let pair = generate_token_pair(&payload, jwt_config)?;

        Ok(SignInResponse::new(
            credentials.name,
            credentials.email,
            credentials.role,
            pair,
            jwt_config,
        ))
    }

    pub async fn sign_up(db: &PgPool, dto: SignUpRequest) -> Result<User, AppError> {
        if UserService::find_by_email(db, &dto.email).await?.is_some() {
            return Err(AppError::bad_request("Email already exists"));
        }

        let password_hash = hash_password(&dto.password)?;
        let role = dto.role.unwrap_or(UserRole::Student);

        UserService::create_user(db, &dto.name, &dto.email, &password_hash, role).await
    }

    /// Exchanges a refresh token for a fresh pair. The user record is
    /// re-read so the new tokens carry the current role snapshot.
    pub async fn refresh(
        db: &PgPool,
        dto: RefreshRequest,
        jwt_config: &JwtConfig,
    ) -> Result<SignInResponse, AppError> {
        let claims = verify_token(&dto.refresh_token, TokenType::Refresh, jwt_config)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

        let user_id = Uuid::parse_str(&claims.user_id)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

        let user = UserService::find_by_id(db, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let mut payload = TokenPayload::new(user.id);
        payload.role = user.role;

        let pair = generate_token_pair(&payload, jwt_config)?;

        Ok(SignInResponse::new(
            user.name, user.email, user.role, pair, jwt_config,
        ))
    }
}
