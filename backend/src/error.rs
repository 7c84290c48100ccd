use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use validator::ValidationErrors;
use wheel_shared::constants::INVALID_WHEEL_ERROR;
use wheel_shared::rate_limit::RateLimitError;

#[derive(Debug)]
pub enum Error {
    Storage(String),
    Serialization(String),
    Validation(ValidationErrors),
    BadRequest(String),
    NotPlayable,
    RateLimited(RateLimitError),
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<ValidationErrors> for Error {
    fn from(err: ValidationErrors) -> Self {
        Error::Validation(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Storage(e) => write!(f, "storage error: {}", e),
            Error::Serialization(e) => write!(f, "serialization error: {}", e),
            Error::Validation(e) => write!(f, "validation failed: {}", validation_codes(e).join(", ")),
            Error::BadRequest(e) => write!(f, "bad request: {}", e),
            Error::NotPlayable => write!(f, "wheel has fewer than 2 segments"),
            Error::RateLimited(e) => write!(f, "rate limited: {}", e.message),
        }
    }
}

impl std::error::Error for Error {}

fn validation_codes(errors: &ValidationErrors) -> Vec<String> {
    let mut codes: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter().map(|e| e.code.to_string()))
        .collect();
    codes.sort();
    codes
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Error::Storage(e) | Error::Serialization(e) => {
                tracing::error!("Request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Storage error" }))
            }
            Error::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": INVALID_WHEEL_ERROR, "codes": validation_codes(e) }),
            ),
            Error::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            Error::NotPlayable => (StatusCode::CONFLICT, json!({ "error": INVALID_WHEEL_ERROR })),
            Error::RateLimited(e) => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "error": e.message, "retryAfterSecs": e.remaining.as_secs() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
