//! Uniform success envelope.
//!
//! Every successful response shares one wire shape:
//! `{"status": "success", "message": ..., "data": ...}`. Handlers build
//! an [`ApiResponse`] instead of serializing payloads directly, which
//! keeps the envelope consistent with the error side (see
//! [`crate::utils::errors::AppError`]).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

/// Success envelope wrapping a payload of type `T`.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status_code: StatusCode,
    message: String,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// HTTP 200 success envelope.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: StatusCode::OK,
            message: message.into(),
            data,
        }
    }

    /// HTTP 201 success envelope.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::success(message, data).with_status(StatusCode::CREATED)
    }

    /// Overrides the HTTP status code while keeping the envelope shape.
    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn to_body(&self) -> Value {
        json!({
            "status": "success",
            "message": self.message,
            "data": self.data,
        })
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self.to_body())).into_response()
    }
}

/// Error envelope shape, used for API documentation only.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `"error"`.
    pub status: String,
    pub message: String,
    /// Always `null` on the error path.
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

/// Optional machine-readable error information.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}
