use axum::extract::State;
use serde_json::{Value, json};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;
use crate::utils::response::{ApiResponse, ErrorResponse};
use crate::validator::ValidatedJson;

use super::model::{
    DeleteUsersRequest, RequestPasswordResetRequest, ResetPasswordRequest, UpdateProfileRequest,
    User,
};
use super::service::UserService;

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = [User]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(State(state): State<AppState>) -> Result<ApiResponse<Vec<User>>, AppError> {
    let users = UserService::list_users(&state.db).await?;
    Ok(ApiResponse::success("Users retrieved successfully", users))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "Profile retrieved successfully", body = User),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<User>, AppError> {
    let user = UserService::find_by_id(&state.db, auth_user.user_id()?)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(ApiResponse::success("Profile retrieved successfully", user))
}

/// Update the authenticated user's profile
#[utoipa::path(
    patch,
    path = "/api/users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated successfully", body = User),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileRequest>,
) -> Result<ApiResponse<User>, AppError> {
    let password_hash = match dto.password.as_deref() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let user = UserService::update_profile(
        &state.db,
        auth_user.user_id()?,
        dto.name.as_deref(),
        password_hash.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(ApiResponse::success("Profile updated successfully", user))
}

/// Soft-delete users by id
#[utoipa::path(
    delete,
    path = "/api/users",
    request_body = DeleteUsersRequest,
    responses(
        (status = 200, description = "Users deleted successfully"),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_users(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<DeleteUsersRequest>,
) -> Result<ApiResponse<Value>, AppError> {
    let deleted = UserService::soft_delete_users(&state.db, &dto.ids).await?;
    Ok(ApiResponse::success(
        "Users deleted successfully",
        json!({ "deleted": deleted }),
    ))
}

/// Request a password reset link
#[utoipa::path(
    post,
    path = "/api/users/profile/reset/request",
    request_body = RequestPasswordResetRequest,
    responses(
        (status = 200, description = "Reset link sent if the account exists"),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Basic authentication required", body = ErrorResponse)
    ),
    security(("basic" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn request_password_reset(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RequestPasswordResetRequest>,
) -> Result<ApiResponse<Value>, AppError> {
    // The response does not reveal whether the account exists; email
    // delivery is best effort.
    if let Some((user, token)) = UserService::create_password_reset(&state.db, &dto.email).await? {
        let email_service = EmailService::new(state.email_config.clone());
        if let Err(err) = email_service
            .send_password_reset_email(&user.email, &user.name, &token)
            .await
        {
            tracing::warn!(error = %err.message, "Failed to send password reset email");
        }
    }

    Ok(ApiResponse::success(
        "If an account exists with that email, a password reset link has been sent.",
        Value::Null,
    ))
}

/// Apply a new password using a reset token
#[utoipa::path(
    patch,
    path = "/api/users/profile/reset",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset successfully"),
        (status = 400, description = "Invalid or expired reset token", body = ErrorResponse),
        (status = 401, description = "Basic authentication required", body = ErrorResponse)
    ),
    security(("basic" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ResetPasswordRequest>,
) -> Result<ApiResponse<Value>, AppError> {
    let password_hash = hash_password(&dto.password)?;
    let user = UserService::apply_password_reset(&state.db, &dto.token, &password_hash).await?;

    let email_service = EmailService::new(state.email_config.clone());
    if let Err(err) = email_service
        .send_password_reset_confirmation(&user.email, &user.name)
        .await
    {
        tracing::warn!(error = %err.message, "Failed to send password reset confirmation");
    }

    Ok(ApiResponse::success(
        "Password has been reset successfully. You can now log in with your new password.",
        Value::Null,
    ))
}
