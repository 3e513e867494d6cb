//! Config Endpoint Service Library
//!
//! Serves a fixed load-balancer configuration document over HTTP and accepts
//! unhealthy-target notifications on a companion route.
//!
//! ```text
//! Client Request
//!     → http (Axum server, request ID, dispatch)
//!     → routing (exact-match route table)
//!     → http handlers (document / notification / 404)
//!     → Client Response
//!
//! Cross-cutting: config (schema, loader, validation), lifecycle (signals)
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod routing;

pub use config::AppConfig;
pub use http::HttpServer;
