//! Request handlers for the task resource.
//!
//! # Responsibilities
//! - Implement the five task operations over the record store
//! - Declare the route table (method + path template per handler)
//!
//! # Design Decisions
//! - Existence is checked before body validation, so an unknown id answers
//!   404 even when the body is also invalid
//! - Mutating handlers answer 204 with an empty body; create answers 201
//! - Store failures surface as 500, never silently swallowed

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::http::request::RequestContext;
use crate::http::response;
use crate::http::server::AppState;
use crate::routing::{Route, Router};
use crate::store::{Filter, Record};
use crate::tasks::model::{Task, TASKS_TABLE};
use crate::tasks::validation::parse_task_body;

/// The route table for the task resource, in match order.
pub fn routes() -> Router {
    Router::new(vec![
        Route::new(Method::GET, "/tasks", list_tasks),
        Route::new(Method::POST, "/tasks", create_task),
        Route::new(Method::PUT, "/tasks/:id", replace_task),
        Route::new(Method::DELETE, "/tasks/:id", remove_task),
        Route::new(Method::PATCH, "/tasks/:id/complete", toggle_complete),
    ])
}

/// GET /tasks — list tasks, optionally filtered by a `search` term that
/// must appear in both title and description.
fn list_tasks(state: &AppState, ctx: &RequestContext) -> Response {
    let filter = ctx
        .query
        .get("search")
        .filter(|term| !term.is_empty())
        .map(|term| {
            let mut filter = Filter::new();
            filter.insert("title".to_string(), term.clone());
            filter.insert("description".to_string(), term.clone());
            filter
        });

    match state.store.select(TASKS_TABLE, filter.as_ref()) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(err) => response::internal_error(&err),
    }
}

/// POST /tasks — validate the body and insert a new incomplete task.
fn create_task(state: &AppState, ctx: &RequestContext) -> Response {
    let body = match parse_task_body(ctx.body.as_ref()) {
        Ok(body) => body,
        Err(_) => return response::invalid_body(),
    };

    let task = Task::new(body.title, body.description);
    let id = task.id;
    let record = match task.into_record() {
        Ok(record) => record,
        Err(err) => return response::internal_error(&err),
    };

    match state.store.insert(TASKS_TABLE, record) {
        Ok(()) => {
            tracing::debug!(id = %id, "Task created");
            StatusCode::CREATED.into_response()
        }
        Err(err) => response::internal_error(&err),
    }
}

/// PUT /tasks/:id — replace title and description of an existing task.
fn replace_task(state: &AppState, ctx: &RequestContext) -> Response {
    let Some(id) = ctx.params.get("id") else {
        return response::internal_error(&"missing id parameter");
    };

    match state.store.find_by_id(TASKS_TABLE, id) {
        Ok(Some(_)) => {}
        Ok(None) => return response::task_not_found(id),
        Err(err) => return response::internal_error(&err),
    }

    let body = match parse_task_body(ctx.body.as_ref()) {
        Ok(body) => body,
        Err(_) => return response::invalid_body(),
    };

    let mut partial = Record::new();
    partial.insert("title".to_string(), json!(body.title));
    partial.insert("description".to_string(), json!(body.description));
    partial.insert("updated_at".to_string(), json!(Utc::now()));

    match state.store.update(TASKS_TABLE, id, partial) {
        Ok(()) => {
            tracing::debug!(id = %id, "Task replaced");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => response::internal_error(&err),
    }
}

/// DELETE /tasks/:id — remove an existing task.
fn remove_task(state: &AppState, ctx: &RequestContext) -> Response {
    let Some(id) = ctx.params.get("id") else {
        return response::internal_error(&"missing id parameter");
    };

    match state.store.find_by_id(TASKS_TABLE, id) {
        Ok(Some(_)) => {}
        Ok(None) => return response::task_not_found(id),
        Err(err) => return response::internal_error(&err),
    }

    match state.store.delete(TASKS_TABLE, id) {
        Ok(()) => {
            tracing::debug!(id = %id, "Task deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => response::internal_error(&err),
    }
}

/// PATCH /tasks/:id/complete — flip `completed_at` between null and now.
fn toggle_complete(state: &AppState, ctx: &RequestContext) -> Response {
    let Some(id) = ctx.params.get("id") else {
        return response::internal_error(&"missing id parameter");
    };

    let record = match state.store.find_by_id(TASKS_TABLE, id) {
        Ok(Some(record)) => record,
        Ok(None) => return response::task_not_found(id),
        Err(err) => return response::internal_error(&err),
    };

    let is_completed = record
        .get("completed_at")
        .map(|v| !v.is_null())
        .unwrap_or(false);
    let now = Utc::now();

    let mut partial = Record::new();
    partial.insert(
        "completed_at".to_string(),
        if is_completed { Value::Null } else { json!(now) },
    );
    partial.insert("updated_at".to_string(), json!(now));

    match state.store.update(TASKS_TABLE, id, partial) {
        Ok(()) => {
            tracing::debug!(id = %id, completed = !is_completed, "Task completion toggled");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => response::internal_error(&err),
    }
}
