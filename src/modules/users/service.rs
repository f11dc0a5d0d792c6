use anyhow::Context;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::users::model::{User, UserCredentials, UserRole};
use crate::utils::errors::AppError;

const USER_COLUMNS: &str = "id, name, email, role, created_at, updated_at";

/// Reset tokens are valid for one hour after creation.
const RESET_TOKEN_TTL_HOURS: i64 = 1;

pub struct UserService;

impl UserService {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by id")?;

        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by email")?;

        Ok(user)
    }

    /// Credential lookup for sign-in; the only query that reads the
    /// password hash.
    pub async fn find_credentials_by_email(
        db: &PgPool,
        email: &str,
    ) -> Result<Option<UserCredentials>, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, name, email, password, role FROM users \
             WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .context("Failed to fetch credentials by email")?;

        Ok(credentials)
    }

    pub async fn create_user(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(db)
        .await
        .context("Failed to insert user")?;

        Ok(user)
    }

    pub async fn list_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY created_at"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch users")?;

        Ok(users)
    }

    pub async fn list_by_role(db: &PgPool, role: UserRole) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE role = $1 AND deleted_at IS NULL ORDER BY created_at"
        ))
        .bind(role)
        .fetch_all(db)
        .await
        .context("Failed to fetch users by role")?;

        Ok(users)
    }

    pub async fn find_by_id_and_role(
        db: &PgPool,
        id: Uuid,
        role: UserRole,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE id = $1 AND role = $2 AND deleted_at IS NULL"
        ))
        .bind(id)
        .bind(role)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by id and role")?;

        Ok(user)
    }

    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        name: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users \
             SET name = COALESCE($2, name), \
                 password = COALESCE($3, password), \
                 updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(password_hash)
        .fetch_optional(db)
        .await
        .context("Failed to update profile")?;

        Ok(user)
    }

    /// Soft-deletes the given users; already-deleted ids are skipped.
    /// Returns the number of rows marked.
    pub async fn soft_delete_users(db: &PgPool, ids: &[Uuid]) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = now() \
             WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(ids)
        .execute(db)
        .await
        .context("Failed to delete users")?;

        Ok(result.rows_affected())
    }

    /// Creates a reset row for the account, if one exists. The row id
    /// in simple (dash-free) form is the emailed token. Returns the
    /// user and token, or `None` when the email is unknown; callers
    /// must not reveal which case occurred.
    pub async fn create_password_reset(
        db: &PgPool,
        email: &str,
    ) -> Result<Option<(User, String)>, AppError> {
        let Some(user) = Self::find_by_email(db, email).await? else {
            return Ok(None);
        };

        let (reset_id,): (Uuid,) =
            sqlx::query_as("INSERT INTO reset_password (email) VALUES ($1) RETURNING id")
                .bind(&user.email)
                .fetch_one(db)
                .await
                .context("Failed to create password reset request")?;

        Ok(Some((user, reset_id.simple().to_string())))
    }

    /// Applies a new password for the account referenced by a reset
    /// token. The row is consumed on success and on expiry.
    pub async fn apply_password_reset(
        db: &PgPool,
        token: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let invalid = || AppError::bad_request("Invalid or expired reset token");

        let reset_id = Uuid::parse_str(token).map_err(|_| invalid())?;

        let row: Option<(String, chrono::DateTime<Utc>)> =
            sqlx::query_as("SELECT email, created_at FROM reset_password WHERE id = $1")
                .bind(reset_id)
                .fetch_optional(db)
                .await
                .context("Failed to fetch password reset request")?;

        let (email, created_at) = row.ok_or_else(invalid)?;

        if Utc::now() - created_at > Duration::hours(RESET_TOKEN_TTL_HOURS) {
            Self::delete_password_reset(db, reset_id).await?;
            return Err(invalid());
        }

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET password = $2, updated_at = now() \
             WHERE email = $1 AND deleted_at IS NULL \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&email)
        .bind(password_hash)
        .fetch_optional(db)
        .await
        .context("Failed to apply password reset")?
        .ok_or_else(invalid)?;

        Self::delete_password_reset(db, reset_id).await?;

        Ok(user)
    }

    async fn delete_password_reset(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM reset_password WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete password reset request")?;

        Ok(())
    }
}
