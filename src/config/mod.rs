//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → document.rs (wire types, rendered once at startup)
//!     → passed by reference into server construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the served document never changes
//!   for the lifetime of the process
//! - All fields have defaults so the service runs with no config file at all
//! - Validation separates syntactic (serde) from semantic checks
//! - Validation returns all errors, not just the first

pub mod document;
pub mod loader;
pub mod schema;
pub mod validation;

pub use document::ConfigDocument;
pub use loader::{load_config, ConfigError};
pub use schema::{AppConfig, DocumentConfig, ListenerConfig, LoggingConfig};

/// Default log filter when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "lb_configd=debug,tower_http=debug";
