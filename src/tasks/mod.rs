//! The task resource.
//!
//! # Data Flow
//! ```text
//! RequestContext
//!     → validation.rs (explicit body checks → TaskBody or InvalidBody)
//!     → handlers.rs (five handlers over the record store)
//!     → model.rs (Task ↔ store record conversion)
//! ```

pub mod handlers;
pub mod model;
pub mod validation;

pub use handlers::routes;
pub use model::{Task, TASKS_TABLE};
