//! Request context construction.
//!
//! # Responsibilities
//! - Carry everything a handler needs as one immutable value
//! - Parse the query string into a flat map
//! - Generate unique request IDs for tracing
//!
//! # Design Decisions
//! - The context is built once per dispatch; handlers never touch the raw
//!   hyper request
//! - A body that is empty or not valid JSON becomes `None`; body validation
//!   downstream turns that into a 400
//! - Request ID added as early as possible (outermost-but-trace layer)

use std::collections::HashMap;

use axum::http::{HeaderValue, Method, Request};
use serde_json::Value;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Immutable per-request value handed to handlers.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    /// Decoded query-string pairs.
    pub query: HashMap<String, String>,
    /// Parsed JSON body, `None` when absent or unparseable.
    pub body: Option<Value>,
    /// Path parameters captured by the matched route.
    pub params: HashMap<String, String>,
}

impl RequestContext {
    /// Build a context with no path parameters; the router fills them in
    /// when a route matches.
    pub fn new(
        method: Method,
        path: String,
        query: HashMap<String, String>,
        body: Option<Value>,
    ) -> Self {
        Self {
            method,
            path,
            query,
            body,
            params: HashMap::new(),
        }
    }
}

/// Decode a raw query string ("a=1&b=two") into a map.
pub fn parse_query(raw: Option<&str>) -> HashMap<String, String> {
    match raw {
        Some(raw) => url::form_urlencoded::parse(raw.as_bytes())
            .into_owned()
            .collect(),
        None => HashMap::new(),
    }
}

/// UUID v4 request IDs for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}
