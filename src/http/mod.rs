//! HTTP transport glue.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, catch-all dispatch)
//!     → request.rs (build immutable RequestContext: query, JSON body)
//!     → routing layer picks the handler, fills path params
//!     → tasks handlers run against the record store
//!     → response.rs (JSON error payloads)
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::RequestContext;
pub use server::{AppState, HttpServer};
