//! Request ID middleware.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4), or echo the client's
//! - Open a tracing span covering the whole request lifecycle
//! - Log request completion with status and duration
//! - Stamp the ID onto the response
//!
//! # Design Decisions
//! - Outermost layer so the span wraps all request processing
//! - ID stored in request extensions for handlers that want it

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request};
use axum::response::Response;
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the request ID on both requests and responses.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Extension type for accessing the request ID in handlers.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Layer that wraps the service in [`RequestIdService`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Middleware service that assigns request IDs and request spans.
#[derive(Clone, Debug)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<S::Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), S::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        // Echo a client-supplied ID; otherwise mint a fresh one.
        let (id, header_value) = match request.headers().get(&X_REQUEST_ID).cloned() {
            Some(value) => match value.to_str() {
                Ok(s) => (s.to_owned(), value),
                Err(_) => fresh_id(),
            },
            None => fresh_id(),
        };

        request.headers_mut().insert(X_REQUEST_ID, header_value.clone());
        request.extensions_mut().insert(RequestId(id.clone()));

        let span = tracing::info_span!(
            "request",
            request_id = %id,
            method = %request.method(),
            path = %request.uri().path(),
            duration_ms = tracing::field::Empty,
        );
        let start = Instant::now();

        // The clone handles the call; readiness was polled on `self`.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(
            async move {
                let mut response = inner.call(request).await?;
                let duration_ms = start.elapsed().as_millis() as u64;

                tracing::Span::current().record("duration_ms", duration_ms);
                tracing::info!(
                    status = response.status().as_u16(),
                    duration_ms,
                    "Request completed"
                );

                response.headers_mut().insert(X_REQUEST_ID, header_value);
                Ok(response)
            }
            .instrument(span),
        )
    }
}

fn fresh_id() -> (String, HeaderValue) {
    let id = Uuid::new_v4().to_string();
    let value = HeaderValue::from_str(&id).unwrap_or(HeaderValue::from_static("unknown"));
    (id, value)
}
