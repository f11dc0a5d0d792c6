//! Role hierarchy policy and role gates.
//!
//! The hierarchy is a lookup table: each role maps to the set of roles
//! it satisfies (itself plus all subordinate roles). Adding a role
//! means adding one table row; there is no polymorphic dispatch.
//!
//! The role gates compose after the bearer gate. They resolve the
//! authenticated principal's persisted record fresh on every request
//! (one lookup, no caching) so role revocations take effect
//! immediately, regardless of what the token claims.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::UserRole;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// The set of roles `role` satisfies, most privileged first.
pub fn role_permissions(role: UserRole) -> &'static [UserRole] {
    match role {
        UserRole::Admin => &[UserRole::Admin, UserRole::Teacher, UserRole::Student],
        UserRole::Teacher => &[UserRole::Teacher, UserRole::Student],
        UserRole::Student => &[UserRole::Student],
    }
}

/// True iff `required` is in the satisfied-set of `actual`.
pub fn has_permission(actual: UserRole, required: UserRole) -> bool {
    role_permissions(actual).contains(&required)
}

/// String-level variant that never fails: empty or unrecognized role
/// names on either side answer `false`.
pub fn role_satisfies(actual: &str, required: &str) -> bool {
    match (UserRole::parse(actual), UserRole::parse(required)) {
        (Some(actual), Some(required)) => has_permission(actual, required),
        _ => false,
    }
}

/// Role gate: verifies the bearer token, loads the user record, and
/// requires a role satisfying `required`. On success the verified
/// claims are attached to the request for downstream extractors.
pub async fn require_role(
    state: AppState,
    req: Request,
    next: Next,
    required: UserRole,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    let user_id = auth_user.user_id()?;

    let user = UserService::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    match user.role {
        Some(role) if has_permission(role, required) => {}
        _ => return Err(AppError::forbidden("Insufficient permissions")),
    }

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(auth_user.0);
    Ok(next.run(req).await)
}

/// Gate for admin-only routes.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_role(state, req, next, UserRole::Admin).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Gate for teacher-level routes (teachers and admins).
pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_role(state, req, next, UserRole::Teacher).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Gate for any authenticated role (students and above).
pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_role(state, req, next, UserRole::Student).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
