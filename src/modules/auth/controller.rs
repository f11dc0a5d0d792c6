use axum::extract::State;
use tracing::instrument;

use crate::modules::users::model::User;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::{ApiResponse, ErrorResponse};
use crate::validator::ValidatedJson;

use super::model::{RefreshRequest, SignInRequest, SignInResponse, SignUpRequest};
use super::service::AuthService;

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/sign/in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in successfully", body = SignInResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    security(("basic" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignInRequest>,
) -> Result<ApiResponse<SignInResponse>, AppError> {
    let response = AuthService::sign_in(&state.db, dto, &state.jwt_config).await?;
    Ok(ApiResponse::success("Signed in successfully", response))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/sign/up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 400, description = "Validation error or email already exists", body = ErrorResponse)
    ),
    security(("basic" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignUpRequest>,
) -> Result<ApiResponse<User>, AppError> {
    let user = AuthService::sign_up(&state.db, dto).await?;
    Ok(ApiResponse::created("User registered successfully", user))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Token refreshed successfully", body = SignInResponse),
        (status = 401, description = "Invalid or expired token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshRequest>,
) -> Result<ApiResponse<SignInResponse>, AppError> {
    let response = AuthService::refresh(&state.db, dto, &state.jwt_config).await?;
    Ok(ApiResponse::success("Token refreshed successfully", response))
}
