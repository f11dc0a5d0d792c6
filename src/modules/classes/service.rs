use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::role::has_permission;
use crate::modules::users::model::{User, UserRole};
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;

use super::model::{Class, ClassDetail, CreateClassRequest, UpdateClassRequest};

const CLASS_COLUMNS: &str =
    "id, name, description, subject, room, teacher_id, created_at, updated_at";

pub struct ClassService;

impl ClassService {
    pub async fn list(db: &PgPool) -> Result<Vec<Class>, AppError> {
        let classes = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE deleted_at IS NULL ORDER BY created_at"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch classes")?;

        Ok(classes)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Class>, AppError> {
        let class = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch class by id")?;

        Ok(class)
    }

    pub async fn get_detail(db: &PgPool, id: Uuid) -> Result<ClassDetail, AppError> {
        let class = Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::not_found("Class not found"))?;

        let students = Self::students_of(db, id).await?;

        Ok(ClassDetail { class, students })
    }

    /// Creates a class. When `teacher_id` names another user, that
    /// user must exist and hold at least the teacher role.
    pub async fn create(
        db: &PgPool,
        creator_id: Uuid,
        dto: CreateClassRequest,
    ) -> Result<Class, AppError> {
        let teacher_id = match dto.teacher_id {
            Some(id) if id != creator_id => {
                let teacher = UserService::find_by_id(db, id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Teacher not found"))?;
                match teacher.role {
                    Some(role) if has_permission(role, UserRole::Teacher) => id,
                    _ => return Err(AppError::not_found("Teacher not found")),
                }
            }
            _ => creator_id,
        };

        let class = sqlx::query_as::<_, Class>(&format!(
            "INSERT INTO classes (name, description, subject, room, teacher_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {CLASS_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.subject)
        .bind(&dto.room)
        .bind(teacher_id)
        .fetch_one(db)
        .await
        .context("Failed to insert class")?;

        Ok(class)
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateClassRequest,
    ) -> Result<Class, AppError> {
        let class = sqlx::query_as::<_, Class>(&format!(
            "UPDATE classes \
             SET name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 subject = COALESCE($4, subject), \
                 room = COALESCE($5, room), \
                 updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {CLASS_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.subject)
        .bind(&dto.room)
        .fetch_optional(db)
        .await
        .context("Failed to update class")?
        .ok_or_else(|| AppError::not_found("Class not found"))?;

        Ok(class)
    }

    pub async fn soft_delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE classes SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(db)
        .await
        .context("Failed to delete class")?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Class not found"));
        }

        Ok(())
    }

    /// Enrolls students into a class. Only ids that reference live
    /// student-role users are inserted; duplicates are ignored.
    /// Returns the number of new enrollments.
    pub async fn assign_students(
        db: &PgPool,
        class_id: Uuid,
        student_ids: &[Uuid],
    ) -> Result<u64, AppError> {
        Self::find_by_id(db, class_id)
            .await?
            .ok_or_else(|| AppError::not_found("Class not found"))?;

        let result = sqlx::query(
            "INSERT INTO class_students (class_id, student_id) \
             SELECT $1, u.id FROM users u \
             WHERE u.id = ANY($2) AND u.role = $3 AND u.deleted_at IS NULL \
             ON CONFLICT DO NOTHING",
        )
        .bind(class_id)
        .bind(student_ids)
        .bind(UserRole::Student)
        .execute(db)
        .await
        .context("Failed to assign students")?;

        Ok(result.rows_affected())
    }

    /// Removes students from a class. Returns the number of removed
    /// enrollments.
    pub async fn unassign_students(
        db: &PgPool,
        class_id: Uuid,
        student_ids: &[Uuid],
    ) -> Result<u64, AppError> {
        Self::find_by_id(db, class_id)
            .await?
            .ok_or_else(|| AppError::not_found("Class not found"))?;

        let result = sqlx::query(
            "DELETE FROM class_students WHERE class_id = $1 AND student_id = ANY($2)",
        )
        .bind(class_id)
        .bind(student_ids)
        .execute(db)
        .await
        .context("Failed to unassign students")?;

        Ok(result.rows_affected())
    }

    pub async fn students_of(db: &PgPool, class_id: Uuid) -> Result<Vec<User>, AppError> {
        let students = sqlx::query_as::<_, User>(
            "SELECT u.id, u.name, u.email, u.role, u.created_at, u.updated_at \
             FROM users u \
             JOIN class_students cs ON cs.student_id = u.id \
             WHERE cs.class_id = $1 AND u.deleted_at IS NULL \
             ORDER BY u.name",
        )
        .bind(class_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch class students")?;

        Ok(students)
    }
}
