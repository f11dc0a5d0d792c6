use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use tracing::instrument;
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::{ApiResponse, ErrorResponse};
use crate::validator::ValidatedJson;

use super::model::{Course, CreateCourseRequest, UpdateCourseRequest, UploadVideoParams};
use super::service::CourseService;

/// List all courses
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Courses retrieved successfully", body = [Course]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Course>>, AppError> {
    let courses = CourseService::list(&state.db).await?;
    Ok(ApiResponse::success(
        "Courses retrieved successfully",
        courses,
    ))
}

/// Get a course by id
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course retrieved successfully", body = Course),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Course>, AppError> {
    let course = CourseService::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Course not found"))?;

    Ok(ApiResponse::success("Course retrieved successfully", course))
}

/// Create a course inside a class
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created successfully", body = Course),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCourseRequest>,
) -> Result<ApiResponse<Course>, AppError> {
    let course = CourseService::create(&state.db, dto).await?;
    Ok(ApiResponse::created("Course created successfully", course))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course id")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated successfully", body = Course),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseRequest>,
) -> Result<ApiResponse<Course>, AppError> {
    let course = CourseService::update(&state.db, id, dto).await?;
    Ok(ApiResponse::success("Course updated successfully", course))
}

/// Upload a course video (raw request body)
#[utoipa::path(
    post,
    path = "/api/courses/{id}/video",
    params(
        ("id" = Uuid, Path, description = "Course id"),
        ("title" = String, Query, description = "Display title for the video")
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Course video uploaded successfully", body = Course),
        (status = 400, description = "Upload rejected", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, body))]
pub async fn upload_course_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UploadVideoParams>,
    body: Bytes,
) -> Result<ApiResponse<Course>, AppError> {
    if body.is_empty() {
        return Err(AppError::bad_request("Video payload must not be empty"));
    }

    CourseService::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Course not found"))?;

    let key = format!("courses/{}.mp4", Uuid::new_v4());
    state
        .storage
        .save(&key, &body)
        .await
        .map_err(|e| AppError::bad_request(e.to_string()))?;
    let url = state
        .storage
        .get_url(&key)
        .map_err(|e| AppError::unexpected(anyhow::anyhow!("Failed to build video URL: {}", e)))?;

    let course = CourseService::attach_video(&state.db, id, &params.title, &url).await?;

    Ok(ApiResponse::success(
        "Course video uploaded successfully",
        course,
    ))
}
