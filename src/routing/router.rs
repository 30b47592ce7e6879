//! Route table and dispatch.
//!
//! # Responsibilities
//! - Hold the ordered (method, pattern, handler) table
//! - Find the first entry matching an inbound method and path
//! - Attach captured path parameters to the request context
//!
//! # Design Decisions
//! - Declaration order is match order; first match wins
//! - Method is checked before the (more expensive) path match
//! - No match returns `None`; the transport layer owns the 404

use axum::http::Method;
use axum::response::Response;

use crate::http::request::RequestContext;
use crate::http::server::AppState;
use crate::routing::matcher::PathPattern;

/// A request handler: pure function of shared state and request context.
pub type Handler = fn(&AppState, &RequestContext) -> Response;

/// One entry in the route table.
pub struct Route {
    method: Method,
    pattern: PathPattern,
    handler: Handler,
}

impl Route {
    /// Create a route entry, compiling the path template.
    pub fn new(method: Method, template: &str, handler: Handler) -> Self {
        Self {
            method,
            pattern: PathPattern::new(template),
            handler,
        }
    }
}

/// Ordered route table, immutable after startup.
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Dispatch a request to the first matching route.
    ///
    /// On a match the captured path parameters are attached to the context
    /// before the handler runs. Returns `None` when no route matches.
    pub fn dispatch(&self, state: &AppState, mut ctx: RequestContext) -> Option<Response> {
        for route in &self.routes {
            if route.method != ctx.method {
                continue;
            }
            if let Some(params) = route.pattern.capture(&ctx.path) {
                tracing::debug!(
                    method = %ctx.method,
                    route = route.pattern.template(),
                    "Route matched"
                );
                ctx.params = params;
                return Some((route.handler)(state, &ctx));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::collections::HashMap;
    use std::sync::Arc;

    use crate::store::RecordStore;

    fn test_state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("db.json"));
        (AppState::new(Arc::new(store)), dir)
    }

    fn ctx(method: Method, path: &str) -> RequestContext {
        RequestContext::new(method, path.to_string(), HashMap::new(), None)
    }

    fn ok_handler(_state: &AppState, _ctx: &RequestContext) -> Response {
        StatusCode::OK.into_response()
    }

    fn param_handler(_state: &AppState, ctx: &RequestContext) -> Response {
        match ctx.params.get("id") {
            Some(id) => (StatusCode::OK, id.clone()).into_response(),
            None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }

    #[test]
    fn test_dispatch_first_match_wins() {
        let router = Router::new(vec![
            Route::new(Method::GET, "/tasks", ok_handler),
            Route::new(Method::GET, "/tasks/:id", param_handler),
        ]);
        let (state, _dir) = test_state();

        let resp = router.dispatch(&state, ctx(Method::GET, "/tasks")).unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_dispatch_skips_wrong_method() {
        let router = Router::new(vec![
            Route::new(Method::POST, "/tasks", ok_handler),
            Route::new(Method::GET, "/tasks/:id", param_handler),
        ]);
        let (state, _dir) = test_state();

        assert!(router.dispatch(&state, ctx(Method::GET, "/tasks")).is_none());

        let resp = router
            .dispatch(&state, ctx(Method::GET, "/tasks/99"))
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_dispatch_attaches_params() {
        let router = Router::new(vec![Route::new(Method::GET, "/tasks/:id", param_handler)]);
        let (state, _dir) = test_state();

        let resp = router
            .dispatch(&state, ctx(Method::GET, "/tasks/abc"))
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_dispatch_no_match() {
        let router = Router::new(vec![Route::new(Method::GET, "/tasks", ok_handler)]);
        let (state, _dir) = test_state();

        assert!(router
            .dispatch(&state, ctx(Method::GET, "/unknown"))
            .is_none());
    }
}
