//! Application error type and its translation to the wire envelope.
//!
//! Every failure surfaced to a client goes through [`AppError`]. Handlers
//! and middleware return `Result<_, AppError>`; the [`IntoResponse`]
//! implementation is the single place where an error becomes an HTTP
//! response, so the envelope shape is uniform across the API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::config::is_production;

/// A tagged application error.
///
/// Carries an explicit HTTP status, a client-facing message, an optional
/// machine-readable code, optional structured details, and an
/// `operational` flag. Operational errors are expected conditions (bad
/// credentials, missing resources) and are echoed verbatim; anything
/// non-operational is treated as an unexpected failure and is redacted
/// when running in production.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub code: Option<String>,
    pub details: Option<Value>,
    pub operational: bool,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
            details: None,
            operational: true,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, message)
    }

    /// Server-side configuration is missing or inconsistent.
    pub fn misconfigured(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Request exceeded the pipeline timeout.
    pub fn timeout() -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "Request timed out")
    }

    /// Request body failed validation. `details` holds one entry per
    /// failing field.
    pub fn validation(details: Vec<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation failed")
            .with_code("VALIDATION_ERROR")
            .with_details(json!(details))
    }

    /// An unexpected, non-operational failure. The real message is kept
    /// so non-production environments can see it; production responses
    /// are redacted to generic text.
    pub fn unexpected(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
            code: Some("INTERNAL_SERVER_ERROR".to_string()),
            details: Some(json!({ "cause": format!("{:#}", err) })),
            operational: false,
        }
    }

    /// Builds the error envelope. Pure with respect to the error value:
    /// calling it twice yields identical output.
    pub fn to_body(&self) -> Value {
        self.envelope(!self.operational && is_production())
    }

    fn envelope(&self, redact: bool) -> Value {
        let message = if redact {
            "Internal server error".to_string()
        } else {
            self.message.clone()
        };

        let mut body = json!({
            "status": "error",
            "message": message,
            "data": null,
        });

        if self.code.is_some() || self.details.is_some() {
            let details = if redact { None } else { self.details.clone() };
            body["error"] = json!({
                "code": self.code,
                "details": details,
            });
        }

        body
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if !self.operational {
            tracing::error!(status = %self.status, message = %self.message, "Unhandled error");
        }

        (self.status, Json(self.to_body())).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::unexpected(err.into())
    }
}
