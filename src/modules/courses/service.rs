use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::classes::service::ClassService;
use crate::utils::errors::AppError;

use super::model::{Course, CreateCourseRequest, UpdateCourseRequest};

const COURSE_COLUMNS: &str = "id, class_id, name, description, video_title, video_url, \
                              position, created_at, updated_at";

pub struct CourseService;

impl CourseService {
    pub async fn list(db: &PgPool) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses \
             WHERE deleted_at IS NULL ORDER BY class_id, position"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch courses")?;

        Ok(courses)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch course by id")?;

        Ok(course)
    }

    /// Creates a course inside an existing class. Without an explicit
    /// position the course lands after the class's current last one.
    pub async fn create(db: &PgPool, dto: CreateCourseRequest) -> Result<Course, AppError> {
        ClassService::find_by_id(db, dto.class_id)
            .await?
            .ok_or_else(|| AppError::not_found("Class not found"))?;

        let course = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (class_id, name, description, video_title, video_url, position) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, \
                 (SELECT COALESCE(MAX(position), 0) + 1 FROM courses \
                  WHERE class_id = $1 AND deleted_at IS NULL))) \
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(dto.class_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.video_title)
        .bind(&dto.video_url)
        .bind(dto.position)
        .fetch_one(db)
        .await
        .context("Failed to insert course")?;

        Ok(course)
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCourseRequest,
    ) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses \
             SET name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 video_title = COALESCE($4, video_title), \
                 video_url = COALESCE($5, video_url), \
                 position = COALESCE($6, position), \
                 updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.video_title)
        .bind(&dto.video_url)
        .bind(dto.position)
        .fetch_optional(db)
        .await
        .context("Failed to update course")?
        .ok_or_else(|| AppError::not_found("Course not found"))?;

        Ok(course)
    }

    /// Records an uploaded video on a course.
    pub async fn attach_video(
        db: &PgPool,
        id: Uuid,
        title: &str,
        url: &str,
    ) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses \
             SET video_title = $2, video_url = $3, updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(url)
        .fetch_optional(db)
        .await
        .context("Failed to attach course video")?
        .ok_or_else(|| AppError::not_found("Course not found"))?;

        Ok(course)
    }
}
