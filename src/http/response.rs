//! Error response payloads.
//!
//! # Responsibilities
//! - The wire shape of error responses: `{"error": ..., "message"?: ...}`
//! - Map error classes to status codes (400, 404, 500)
//!
//! # Design Decisions
//! - Validation failures get a generic message, not field-level detail
//! - Not-found messages name the missing id
//! - Store failures are logged server-side and surfaced as an opaque 500

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 400 for a body that failed validation.
pub fn invalid_body() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: "Invalid request body".to_string(),
            message: None,
        }),
    )
        .into_response()
}

/// 404 for an unknown task id.
pub fn task_not_found(id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_string(),
            message: Some(format!("Could not find task with id {id}")),
        }),
    )
        .into_response()
}

/// 500 for a store or serialization failure; the cause is logged, not sent.
pub fn internal_error(err: &dyn std::fmt::Display) -> Response {
    tracing::error!(error = %err, "Request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "Internal server error".to_string(),
            message: None,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_omits_absent_message() {
        let body = ErrorBody {
            error: "Invalid request body".to_string(),
            message: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"Invalid request body"}"#);
    }

    #[test]
    fn test_error_body_includes_message() {
        let body = ErrorBody {
            error: "Not found".to_string(),
            message: Some("Could not find task with id 42".to_string()),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""message":"Could not find task with id 42""#));
    }
}
