//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (scan route table in declaration order)
//!     → matcher.rs (match path template, capture :params)
//!     → Invoke handler with params attached, or NoMatch → 404
//!
//! Route Compilation (at startup):
//!     "/tasks/:id/complete"
//!     → Split into literal and parameter segments
//!     → Freeze as immutable PathPattern
//! ```
//!
//! # Design Decisions
//! - Route table built at startup, immutable at runtime
//! - No regex: segment-wise comparison only
//! - Deterministic: first matching entry wins
//! - Explicit no-match rather than a silent default route

pub mod matcher;
pub mod router;

pub use matcher::PathPattern;
pub use router::{Route, Router};
