use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A course: one unit of material inside a class, ordered by
/// `position`, optionally carrying an uploaded video.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub class_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub video_title: Option<String>,
    pub video_url: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseRequest {
    pub class_id: Uuid,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    pub video_title: Option<String>,
    pub video_url: Option<String>,
    /// Defaults to the next free position within the class.
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub video_title: Option<String>,
    pub video_url: Option<String>,
    pub position: Option<i32>,
}

/// Query parameters for the raw-body video upload endpoint.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UploadVideoParams {
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_course_requires_name() {
        let dto = CreateCourseRequest {
            class_id: Uuid::new_v4(),
            name: "".to_string(),
            description: None,
            video_title: None,
            video_url: None,
            position: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_course_serializes_optional_video_fields() {
        let course = Course {
            id: Uuid::new_v4(),
            class_id: Uuid::new_v4(),
            name: "Fractions".to_string(),
            description: None,
            video_title: None,
            video_url: None,
            position: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&course).unwrap();
        assert_eq!(value["position"], 1);
        assert!(value["video_url"].is_null());
    }
}
