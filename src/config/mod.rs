//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file
//!     → loader.rs (read, deserialize)
//!     → validation.rs (semantic checks, all errors collected)
//!     → ServerConfig (immutable after startup)
//! ```
//!
//! # Design Decisions
//! - Every section has a `Default`; a missing file or flag means defaults
//! - Validation is a pure function over the parsed config
//! - No hot reload: the config is fixed for the process lifetime

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ServerConfig;
