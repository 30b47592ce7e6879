//! Lifecycle management.
//!
//! # Design Decisions
//! - Startup order: config first, then the store, then the listener
//! - Shutdown is signalled over a broadcast channel so tests can stop the
//!   server without sending OS signals

pub mod shutdown;

pub use shutdown::Shutdown;
