//! User entities, roles, and profile/reset DTOs.
//!
//! [`UserRole`] is the single source of truth for role names: it backs
//! the `user_role` Postgres enum, the lowercase wire format, and the
//! string parsing used by the role policy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Hierarchical user role: `student < teacher < admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Teacher,
    Admin,
}

impl UserRole {
    /// Parses the lowercase wire form. Unknown or empty strings are
    /// `None`, never a panic.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(Self::Student),
            "teacher" => Some(Self::Teacher),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }
}

/// A user as exposed by the API. The password hash never leaves the
/// service layer; see [`UserCredentials`].
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Option<UserRole>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Credential row used only for password verification during sign-in.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
}

/// DTO for updating the authenticated user's profile.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: Option<String>,
}

/// DTO for bulk soft deletion of users.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DeleteUsersRequest {
    #[validate(length(min = 1, message = "ids must not be empty"))]
    pub ids: Vec<Uuid>,
}

/// DTO requesting a password reset link.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RequestPasswordResetRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
}

/// DTO applying a new password with an emailed reset token.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_round_trip() {
        for role in [UserRole::Student, UserRole::Teacher, UserRole::Admin] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        assert_eq!(UserRole::parse(""), None);
        assert_eq!(UserRole::parse("Student"), None);
        assert_eq!(UserRole::parse("superuser"), None);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Teacher).unwrap(),
            r#""teacher""#
        );
    }

    #[test]
    fn test_user_serialization_has_no_password_field() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            role: Some(UserRole::Student),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["email"], "ada@example.com");
        assert_eq!(value["role"], "student");
    }

    #[test]
    fn test_update_profile_validation() {
        let valid = UpdateProfileRequest {
            name: Some("New Name".to_string()),
            password: None,
        };
        assert!(valid.validate().is_ok());

        let short_password = UpdateProfileRequest {
            name: None,
            password: Some("short".to_string()),
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_delete_users_requires_ids() {
        let empty = DeleteUsersRequest { ids: vec![] };
        assert!(empty.validate().is_err());

        let one = DeleteUsersRequest {
            ids: vec![Uuid::new_v4()],
        };
        assert!(one.validate().is_ok());
    }
}
