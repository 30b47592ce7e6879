//! Request body validation for the task resource.
//!
//! # Responsibilities
//! - Check the create/replace body: required non-empty `title`, optional
//!   `description`
//! - Produce the trimmed values the handlers store
//!
//! # Design Decisions
//! - Explicit checks returning a result, no declarative schema layer
//! - `title` is trimmed before the emptiness check and stored trimmed
//! - `description` is kept verbatim; JSON `null` counts as absent

use serde_json::Value;
use thiserror::Error;

/// A validated create/replace body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBody {
    pub title: String,
    pub description: Option<String>,
}

/// The body failed validation; surfaced as a generic 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid request body")]
pub struct InvalidBody;

/// Validate a parsed JSON body into a [`TaskBody`].
pub fn parse_task_body(body: Option<&Value>) -> Result<TaskBody, InvalidBody> {
    let Some(Value::Object(map)) = body else {
        return Err(InvalidBody);
    };

    let title = match map.get("title") {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => return Err(InvalidBody),
    };
    if title.is_empty() {
        return Err(InvalidBody);
    }

    let description = match map.get("description") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(InvalidBody),
    };

    Ok(TaskBody { title, description })
}
