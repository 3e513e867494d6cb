//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Render the configuration document and compile the route table
//! - Create the Axum router with wildcard routes feeding the dispatcher
//! - Wire up middleware (tracing, request ID)
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - Axum only sees two wildcard routes; the real routing decision is the
//!   route table's exact (method, raw request-target) lookup, so query
//!   strings and near-miss paths fall through to the 404 contract
//! - The document is rendered exactly once, at construction; a rendering
//!   failure aborts startup instead of surfacing per-request

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::document::ConfigDocument;
use crate::config::AppConfig;
use crate::http::handlers;
use crate::http::request::RequestIdLayer;
use crate::lifecycle::signals::shutdown_signal;
use crate::routing::{RouteAction, RouteTable};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub document: Bytes,
}

/// HTTP server for the config endpoint service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server from the given configuration.
    ///
    /// Renders the configuration document and compiles the route table;
    /// a serialization failure here is startup-fatal.
    pub fn new(config: &AppConfig) -> Result<Self, serde_json::Error> {
        let document = ConfigDocument::from_config(&config.document);
        let rendered = Bytes::from(document.render()?);
        let routes = Arc::new(RouteTable::from_document(&document));

        tracing::debug!(
            routes = routes.len(),
            document_bytes = rendered.len(),
            "Route table compiled"
        );

        let state = AppState {
            routes,
            document: rendered,
        };

        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until an interrupt signal arrives.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.run_with_shutdown(listener, shutdown_signal()).await
    }

    /// Run the server until the given future resolves, then drain and stop.
    pub async fn run_with_shutdown<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The underlying router, for driving requests through in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Match the request against the route table and run the matched handler.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    // The raw request-target: path plus any query string, compared verbatim.
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    match state.routes.lookup(request.method(), &target) {
        Some(route) => match route.action {
            RouteAction::ServeDocument => handlers::serve_document(state.document.clone()),
            RouteAction::RecordUnhealthy => {
                let (parts, body) = request.into_parts();
                handlers::record_unhealthy(&parts, body).await
            }
        },
        None => {
            tracing::debug!(method = %request.method(), target = %target, "No route matched");
            handlers::not_found()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::DEFAULT_SERVICE_ID;
    use crate::http::handlers::{ACK_BODY, NOT_FOUND_BODY};
    use crate::http::request::X_REQUEST_ID;
    use crate::routing::UNHEALTHY_PATH_PREFIX;
    use axum::http::{header, Method, StatusCode};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;
    use tracing::instrument::WithSubscriber;
    use tracing_subscriber::fmt::MakeWriter;

    fn test_router() -> Router {
        HttpServer::new(&AppConfig::default()).unwrap().router()
    }

    fn unhealthy_path() -> String {
        format!("{UNHEALTHY_PATH_PREFIX}{DEFAULT_SERVICE_ID}")
    }

    fn request(method: Method, target: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(target)
            .body(body)
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn get_document_returns_json() {
        let response = test_router()
            .oneshot(request(Method::GET, "/api/deployments/lb-config-ng", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(
            body["http"]["routers"]["finer-snail-230f97.flakery.xyz"]["service"],
            DEFAULT_SERVICE_ID
        );
    }

    #[tokio::test]
    async fn unknown_path_is_404_with_fixed_body() {
        let response = test_router()
            .oneshot(request(Method::GET, "/api/deployments/other", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, NOT_FOUND_BODY);
    }

    #[tokio::test]
    async fn query_string_falls_through_to_404() {
        let response = test_router()
            .oneshot(request(
                Method::GET,
                "/api/deployments/lb-config-ng?verbose=1",
                Body::empty(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn wrong_method_is_404_not_405() {
        let response = test_router()
            .oneshot(request(Method::GET, &unhealthy_path(), Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, NOT_FOUND_BODY);
    }

    #[tokio::test]
    async fn notification_is_acknowledged() {
        let req = Request::builder()
            .method(Method::POST)
            .uri(unhealthy_path())
            .header(header::CONTENT_LENGTH, "4")
            .body(Body::from("test"))
            .unwrap();

        let response = test_router().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(body_string(response).await, ACK_BODY);
    }

    #[tokio::test]
    async fn empty_notification_is_accepted() {
        let req = Request::builder()
            .method(Method::POST)
            .uri(unhealthy_path())
            .header(header::CONTENT_LENGTH, "0")
            .body(Body::empty())
            .unwrap();

        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_content_length_is_400() {
        let response = test_router()
            .oneshot(request(Method::POST, &unhealthy_path(), Body::from("test")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_utf8_body_is_400() {
        let req = Request::builder()
            .method(Method::POST)
            .uri(unhealthy_path())
            .header(header::CONTENT_LENGTH, "2")
            .body(Body::from(vec![0xff, 0xfe]))
            .unwrap();

        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn client_request_id_is_echoed() {
        let req = Request::builder()
            .method(Method::GET)
            .uri("/api/deployments/lb-config-ng")
            .header(&X_REQUEST_ID, "client-supplied-id")
            .body(Body::empty())
            .unwrap();

        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.headers()[&X_REQUEST_ID], "client-supplied-id");
    }

    #[tokio::test]
    async fn generated_request_id_is_present() {
        let response = test_router()
            .oneshot(request(Method::GET, "/", Body::empty()))
            .await
            .unwrap();

        assert!(response.headers().contains_key(&X_REQUEST_ID));
    }

    /// Log writer capturing everything into a shared buffer.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn notification_payload_is_logged() {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(false)
            .finish();

        let req = Request::builder()
            .method(Method::POST)
            .uri(unhealthy_path())
            .header(header::CONTENT_LENGTH, "4")
            .body(Body::from("test"))
            .unwrap();

        let response = async { test_router().oneshot(req).await.unwrap() }
            .with_subscriber(subscriber)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("test"));
        assert!(logs.contains(&unhealthy_path()));
    }
}
