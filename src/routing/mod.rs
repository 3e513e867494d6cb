//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, raw request-target)
//!     → table.rs (ordered scan, exact comparison)
//!     → Return: matched Route or no match (caller serves 404)
//!
//! Route Compilation (at startup):
//!     ConfigDocument
//!     → one GET route for the document path
//!     → one POST route per service id
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Exact byte-for-byte comparison of the raw request-target; a query
//!   string or trailing slash defeats the match
//! - Method is part of the route, not a separate dimension: a wrong
//!   method is an ordinary miss (404, never 405)
//! - First match wins (ordered scan)

pub mod table;

pub use table::{Route, RouteAction, RouteTable, CONFIG_PATH, UNHEALTHY_PATH_PREFIX};
