//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the Axum app with a catch-all route feeding the task router
//! - Wire up middleware (timeout, body limit, request ID, tracing)
//! - Build the per-request context and dispatch it
//! - Answer 404 with an empty body when no route matches
//!
//! # Design Decisions
//! - One dispatch handler for every method and path; route selection is the
//!   task router's job, not Axum's
//! - The store is constructed by the caller and passed in explicitly

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer, request_id::SetRequestIdLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::{parse_query, MakeRequestUuid, RequestContext};
use crate::routing::Router as TaskRouter;
use crate::store::RecordStore;
use crate::tasks;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

/// State seen by the dispatch handler: the route table plus handler state.
#[derive(Clone)]
struct ServerState {
    router: Arc<TaskRouter>,
    app: AppState,
}

/// HTTP server for the task API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given store.
    pub fn new(config: ServerConfig, store: Arc<RecordStore>) -> Self {
        let state = ServerState {
            router: Arc::new(tasks::routes()),
            app: AppState::new(store),
        };

        Self {
            router: Self::build_router(&config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: ServerState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until a Ctrl+C signal arrives.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.serve(listener, shutdown_signal()).await
    }

    /// Run the server until the shutdown channel fires.
    pub async fn run_until(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        self.serve(listener, async move {
            let _ = shutdown.recv().await;
        })
        .await
    }

    async fn serve<F>(self, listener: TcpListener, signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: build the request context and dispatch it.
async fn dispatch_handler(
    State(state): State<ServerState>,
    request: Request<Body>,
) -> Response {
    let (parts, body) = request.into_parts();

    let request_id = parts
        .headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let path = parts.uri.path().to_string();
    let query = parse_query(parts.uri.query());

    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(request_id = %request_id, error = %err, "Failed to read request body");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };
    let body = if bytes.is_empty() {
        None
    } else {
        // Unparseable JSON is treated as an absent body; validation rejects it
        serde_json::from_slice(&bytes).ok()
    };

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        path = %path,
        "Dispatching request"
    );

    let ctx = RequestContext::new(parts.method, path, query, body);
    match state.router.dispatch(&state.app, ctx) {
        Some(response) => response,
        None => {
            tracing::debug!(request_id = %request_id, "No route matched");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
    }
    tracing::info!("Shutdown signal received");
}
