//! Request body validation.
//!
//! Handlers accept `ValidatedJson<Dto>` instead of `Json<Dto>`. The extractor
//! parses the body (an empty body counts as `{}`), drops unknown properties,
//! and runs the DTO's `validator` rules before the handler sees it. Any
//! failure becomes a 400 with per-field messages.

use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::{ApiError, FieldErrors};

/// JSON body extractor that runs `Validate` before the handler sees the value
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(body_rejection)?;

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            &b"{}"[..]
        } else {
            &bytes[..]
        };

        let dto: T = serde_json::from_slice(body).map_err(|e| {
            tracing::debug!("Rejected request body: {}", e);
            ApiError::invalid_json(format!("Invalid request body: {}", e))
        })?;

        dto.validate()
            .map_err(|e| ApiError::validation_error("Validation failed", Some(field_errors(&e))))?;

        Ok(ValidatedJson(dto))
    }
}

fn body_rejection(rejection: BytesRejection) -> ApiError {
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::payload_too_large(rejection.body_text()),
        _ => ApiError::bad_request(rejection.body_text()),
    }
}

/// Flatten `validator` output to one message per field, keeping the first
/// rule that failed.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let first = errs.first()?;
            let message = match &first.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            };
            Some((field.to_string(), message))
        })
        .collect()
}
