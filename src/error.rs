//! Gateway error types with HTTP status code mapping.
//!
//! [`QuestError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and a JSON error body of the shape
//! `{"error": "<message>"}`, with an optional `details` field for
//! upstream-provider failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": "task not found: 9be9…"
/// }
/// ```
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Optional additional details (upstream provider error text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Category                   | HTTP Status               |
/// |----------------------------|---------------------------|
/// | Missing/invalid input      | 400 Bad Request           |
/// | Missing/invalid bearer     | 401 Unauthorized          |
/// | User/task/quest not found  | 404 Not Found             |
/// | Invalid task configuration | 422 Unprocessable Entity  |
/// | Provider/persistence/other | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum QuestError {
    /// A required request parameter was absent or empty.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or invalid bearer token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// No user matched the given wallet address or identifier.
    #[error("user not found")]
    UserNotFound,

    /// Task with the given ID was not found.
    #[error("task not found: {0}")]
    TaskNotFound(uuid::Uuid),

    /// Quest with the given ID was not found.
    #[error("quest not found: {0}")]
    QuestNotFound(uuid::Uuid),

    /// The task row itself is misconfigured (e.g. a quiz with no
    /// correct-answer configuration, or a follow task with no target).
    #[error("invalid task configuration: {0}")]
    InvalidTaskConfig(String),

    /// An upstream social/OAuth provider call failed.
    #[error("provider error: {0}")]
    Provider(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl QuestError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::UserNotFound | Self::TaskNotFound(_) | Self::QuestNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidTaskConfig(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Provider(_) | Self::Persistence(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for QuestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: self.to_string(),
            details: None,
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
    fn status_mapping() {
        assert_eq!(
            QuestError::MissingParameter("userWallet").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            QuestError::Unauthorized("no bearer".to_string()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(QuestError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            QuestError::TaskNotFound(uuid::Uuid::new_v4()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            QuestError::InvalidTaskConfig("quiz has no answers".to_string()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            QuestError::Provider("twitter returned 503".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_body_omits_empty_details() {
        let body = ErrorResponse {
            error: "user not found".to_string(),
            details: None,
        };
        let json = serde_json::to_value(&body).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json, serde_json::json!({ "error": "user not found" }));
    }
}
