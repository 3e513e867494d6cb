//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, wildcard routes, dispatch)
//!     → request.rs (add request ID, open request span)
//!     → routing table decides handler
//!     → handlers.rs (document / notification / not-found)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::{RequestId, RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
