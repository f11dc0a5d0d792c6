//! JSON extraction with validation.
//!
//! [`ValidatedJson`] deserializes the body and runs `validator` rules
//! before the handler sees it. Deserialization failures become 400s
//! with a readable message; rule failures become 400s carrying the
//! per-field messages as a details array.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::AppError;

fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let error_msg = rejection.body_text();

                if error_msg.contains("missing field") {
                    let field = error_msg
                        .split("missing field `")
                        .nth(1)
                        .and_then(|s| s.split('`').next())
                        .unwrap_or("unknown");
                    return AppError::bad_request(format!("{} is required", field));
                }

                if error_msg.contains("invalid type") {
                    return AppError::bad_request("Invalid field type in request");
                }

                if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
                    return AppError::bad_request(
                        "Missing 'Content-Type: application/json' header",
                    );
                }

                AppError::bad_request("Invalid request body")
            })?;

        value
            .validate()
            .map_err(|errors| AppError::validation(collect_messages(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "name must be at least 3 characters"))]
        name: String,
        #[validate(email(message = "email must be a valid email address"))]
        email: String,
    }

    #[test]
    fn test_collect_messages_uses_custom_messages() {
        let sample = Sample {
            name: "ab".to_string(),
            email: "nope".to_string(),
        };
        let errors = sample.validate().unwrap_err();
        let mut messages = collect_messages(&errors);
        messages.sort();

        assert_eq!(
            messages,
            vec![
                "email must be a valid email address".to_string(),
                "name must be at least 3 characters".to_string(),
            ]
        );
    }

    #[test]
    fn test_collect_messages_empty_when_valid() {
        let sample = Sample {
            name: "abc".to_string(),
            email: "a@b.co".to_string(),
        };
        assert!(sample.validate().is_ok());
    }
}
