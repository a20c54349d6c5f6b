//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4002,
///     "message": "shift duration out of range: 20 minutes",
///     "details": "shift_end_time"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`ApiError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Form field the error is attributed to, when field-level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                |
/// |-----------|-----------------|----------------------------|
/// | 1000–1999 | Request parsing | 400 Bad Request            |
/// | 2000–2999 | Not Found       | 404 Not Found              |
/// | 3000–3999 | Server          | 500 Internal Server Error  |
/// | 4000–4999 | Shift invariant | 422 Unprocessable Entity   |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A time-of-day string did not parse as 24-hour `HH:MM`.
    #[error("invalid time format: {0:?}")]
    InvalidTimeFormat(String),

    /// Request validation failed before any time combination happened.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Shift with the given ID was not found.
    #[error("shift not found: {0}")]
    ShiftNotFound(i64),

    /// Combined end timestamp is not strictly after the start timestamp.
    #[error("shift end must be after shift start")]
    EndBeforeStart,

    /// Shift duration falls outside the allowed 30 minute – 24 hour window.
    #[error("shift duration out of range: {minutes} minutes")]
    DurationOutOfRange {
        /// Actual duration of the rejected shift, in minutes.
        minutes: i64,
    },

    /// Storage rejected a write because a row invariant does not hold.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Persistence layer transport failure.
    #[error("storage failure: {0}")]
    StorageFailure(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidTimeFormat(_) => 1001,
            Self::InvalidRequest(_) => 1002,
            Self::ShiftNotFound(_) => 2001,
            Self::EndBeforeStart => 4001,
            Self::DurationOutOfRange { .. } => 4002,
            Self::ConstraintViolation(_) => 4003,
            Self::Internal(_) => 3000,
            Self::StorageFailure(_) => 3001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidTimeFormat(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ShiftNotFound(_) => StatusCode::NOT_FOUND,
            Self::EndBeforeStart
            | Self::DurationOutOfRange { .. }
            | Self::ConstraintViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::StorageFailure(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the form field this error is attributed to, when field-level.
    ///
    /// Duration and ordering violations are reported on the end-time field
    /// so edit forms can highlight the offending input.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::EndBeforeStart | Self::DurationOutOfRange { .. } => Some("shift_end_time"),
            Self::InvalidTimeFormat(_) => Some("shift_start_time"),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: self.field().map(str::to_string),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_by_category() {
        assert_eq!(
            ApiError::InvalidTimeFormat("9am".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ShiftNotFound(7).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::DurationOutOfRange { minutes: 20 }.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::StorageFailure("connection refused".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duration_errors_attributed_to_end_field() {
        assert_eq!(
            ApiError::DurationOutOfRange { minutes: 0 }.field(),
            Some("shift_end_time")
        );
        assert_eq!(ApiError::EndBeforeStart.field(), Some("shift_end_time"));
        assert_eq!(ApiError::ShiftNotFound(1).field(), None);
    }

    #[test]
    fn response_body_shape() {
        let error = ApiError::DurationOutOfRange { minutes: 20 };
        let body = ErrorResponse {
            error: ErrorBody {
                code: error.error_code(),
                message: error.to_string(),
                details: error.field().map(str::to_string),
            },
        };
        let Ok(json) = serde_json::to_value(&body) else {
            panic!("serializable body");
        };
        assert_eq!(json.pointer("/error/code"), Some(&4002.into()));
        assert_eq!(
            json.pointer("/error/details"),
            Some(&"shift_end_time".into())
        );
    }
}
