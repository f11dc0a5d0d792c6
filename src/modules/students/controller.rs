//! Students are users with the student role; this module is a
//! read-only view over the users table for teacher-facing rosters.

use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{User, UserRole};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::{ApiResponse, ErrorResponse};

/// List all students
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "Students retrieved successfully", body = [User]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<User>>, AppError> {
    let students = UserService::list_by_role(&state.db, UserRole::Student).await?;
    Ok(ApiResponse::success(
        "Students retrieved successfully",
        students,
    ))
}

/// Get a student by id
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student retrieved successfully", body = User),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<User>, AppError> {
    let student = UserService::find_by_id_and_role(&state.db, id, UserRole::Student)
        .await?
        .ok_or_else(|| AppError::not_found("Student not found"))?;

    Ok(ApiResponse::success(
        "Student retrieved successfully",
        student,
    ))
}
