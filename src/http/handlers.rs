//! Route handlers.
//!
//! # Responsibilities
//! - Serve the pre-rendered configuration document
//! - Accept, log, and acknowledge unhealthy-target notifications
//! - Produce the not-found and bad-request responses
//!
//! # Design Decisions
//! - The document is served verbatim from the bytes rendered at startup,
//!   so repeated responses are byte-identical
//! - Malformed notification input (missing Content-Length, oversized or
//!   unreadable body, invalid UTF-8) is a 400, never fatal to the process
//! - The acknowledgement body is a fixed literal so consumers get the
//!   exact bytes they expect

use axum::body::{Body, Bytes};
use axum::http::{header, request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};

/// Fixed acknowledgement body for accepted notifications.
pub const ACK_BODY: &str = r#"{"status": "success", "message": "POST request logged"}"#;

/// Body of every not-found response.
pub const NOT_FOUND_BODY: &str = "Path not found";

/// Upper bound on notification payload size.
const MAX_NOTIFICATION_BYTES: usize = 1024 * 1024;

/// Serve the configuration document rendered at startup.
pub fn serve_document(document: Bytes) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        document,
    )
        .into_response()
}

/// Log an unhealthy-target notification and acknowledge it.
///
/// Reads the declared number of body bytes, decodes them as UTF-8, and emits
/// one log record carrying the request path and the decoded payload. The
/// payload is never stored or forwarded.
pub async fn record_unhealthy(parts: &Parts, body: Body) -> Response {
    let declared = match parts.headers.get(header::CONTENT_LENGTH) {
        Some(value) => match value.to_str().ok().and_then(|v| v.parse::<usize>().ok()) {
            Some(length) => length,
            None => return bad_request("invalid Content-Length header"),
        },
        None => return bad_request("missing Content-Length header"),
    };

    if declared > MAX_NOTIFICATION_BYTES {
        return bad_request("notification payload too large");
    }

    let bytes = match axum::body::to_bytes(body, MAX_NOTIFICATION_BYTES).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!(path = %parts.uri.path(), %error, "Failed to read notification body");
            return bad_request("failed to read request body");
        }
    };

    let payload = match std::str::from_utf8(&bytes) {
        Ok(text) => text,
        Err(_) => return bad_request("request body is not valid UTF-8"),
    };

    tracing::info!(
        path = %parts.uri.path(),
        body = %payload,
        "Unhealthy target notification received"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        ACK_BODY,
    )
        .into_response()
}

/// Response for any request that matches no route.
pub fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        NOT_FOUND_BODY,
    )
        .into_response()
}

fn bad_request(reason: &'static str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "text/plain")],
        reason,
    )
        .into_response()
}
