//! Task-management HTTP API.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!       │
//!       ▼
//!   ┌─────────┐    ┌──────────┐    ┌──────────┐    ┌─────────┐
//!   │  http   │───▶│ routing  │───▶│  tasks   │───▶│  store  │
//!   │ server  │    │  engine  │    │ handlers │    │ (file)  │
//!   └─────────┘    └──────────┘    └──────────┘    └─────────┘
//!
//!   Cross-cutting: config (TOML), lifecycle (shutdown), tracing
//! ```
//!
//! The `http` module owns the transport (Axum); the `routing` module maps
//! method + path template to a handler and extracts path parameters; the
//! `tasks` module implements the resource; the `store` module owns the
//! file-persisted table collection.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod routing;
pub mod store;
pub mod tasks;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::RecordStore;
