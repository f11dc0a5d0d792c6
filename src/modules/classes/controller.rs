use axum::extract::{Path, State};
use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::{ApiResponse, ErrorResponse};
use crate::validator::ValidatedJson;

use super::model::{
    AssignStudentsRequest, Class, ClassDetail, CreateClassRequest, UpdateClassRequest,
};
use super::service::ClassService;

/// List all classes
#[utoipa::path(
    get,
    path = "/api/classes",
    responses(
        (status = 200, description = "Classes retrieved successfully", body = [Class]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_classes(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Class>>, AppError> {
    let classes = ClassService::list(&state.db).await?;
    Ok(ApiResponse::success(
        "Classes retrieved successfully",
        classes,
    ))
}

/// Get a class with its enrolled students
#[utoipa::path(
    get,
    path = "/api/classes/{id}",
    params(("id" = Uuid, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class retrieved successfully", body = ClassDetail),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<ClassDetail>, AppError> {
    let detail = ClassService::get_detail(&state.db, id).await?;
    Ok(ApiResponse::success("Class retrieved successfully", detail))
}

/// Create a class
#[utoipa::path(
    post,
    path = "/api/classes",
    request_body = CreateClassRequest,
    responses(
        (status = 201, description = "Class created successfully", body = Class),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateClassRequest>,
) -> Result<ApiResponse<Class>, AppError> {
    let class = ClassService::create(&state.db, auth_user.user_id()?, dto).await?;
    Ok(ApiResponse::created("Class created successfully", class))
}

/// Update a class
#[utoipa::path(
    put,
    path = "/api/classes/{id}",
    params(("id" = Uuid, Path, description = "Class id")),
    request_body = UpdateClassRequest,
    responses(
        (status = 200, description = "Class updated successfully", body = Class),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateClassRequest>,
) -> Result<ApiResponse<Class>, AppError> {
    let class = ClassService::update(&state.db, id, dto).await?;
    Ok(ApiResponse::success("Class updated successfully", class))
}

/// Soft-delete a class
#[utoipa::path(
    delete,
    path = "/api/classes/{id}",
    params(("id" = Uuid, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class deleted successfully"),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Value>, AppError> {
    ClassService::soft_delete(&state.db, id).await?;
    Ok(ApiResponse::success(
        "Class deleted successfully",
        Value::Null,
    ))
}

/// Enroll students into a class
#[utoipa::path(
    post,
    path = "/api/classes/{id}/students",
    params(("id" = Uuid, Path, description = "Class id")),
    request_body = AssignStudentsRequest,
    responses(
        (status = 200, description = "Students assigned successfully"),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn assign_students(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AssignStudentsRequest>,
) -> Result<ApiResponse<Value>, AppError> {
    let assigned = ClassService::assign_students(&state.db, id, &dto.student_ids).await?;
    Ok(ApiResponse::success(
        "Students assigned successfully",
        json!({ "assigned": assigned }),
    ))
}

/// Remove students from a class
#[utoipa::path(
    delete,
    path = "/api/classes/{id}/students",
    params(("id" = Uuid, Path, description = "Class id")),
    request_body = AssignStudentsRequest,
    responses(
        (status = 200, description = "Students removed successfully"),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn unassign_students(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AssignStudentsRequest>,
) -> Result<ApiResponse<Value>, AppError> {
    let removed = ClassService::unassign_students(&state.db, id, &dto.student_ids).await?;
    Ok(ApiResponse::success(
        "Students removed successfully",
        json!({ "removed": removed }),
    ))
}
