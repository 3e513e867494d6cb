//! Static route table with exact request-target matching.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up the route for a (method, raw request-target) pair
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) ordered scan, first match wins (n is two for the default config)
//! - Case-sensitive; no normalization, no percent-decoding

use axum::http::Method;

use crate::config::document::ConfigDocument;

/// Path of the configuration document route.
pub const CONFIG_PATH: &str = "/api/deployments/lb-config-ng";

/// Prefix of the unhealthy-target notification routes; the service id
/// completes each path.
pub const UNHEALTHY_PATH_PREFIX: &str = "/api/deployments/target/unhealthy/";

/// What a matched route does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    /// Serve the rendered configuration document.
    ServeDocument,
    /// Log the notification payload and acknowledge.
    RecordUnhealthy,
}

/// A single compiled route.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub target: String,
    pub action: RouteAction,
}

/// Ordered, immutable route table. First match wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Compile the table from the configuration document: one GET route for
    /// the document itself, one POST notification route per service id.
    pub fn from_document(document: &ConfigDocument) -> Self {
        let mut routes = vec![Route {
            method: Method::GET,
            target: CONFIG_PATH.to_string(),
            action: RouteAction::ServeDocument,
        }];

        for service_id in document.service_ids() {
            routes.push(Route {
                method: Method::POST,
                target: format!("{UNHEALTHY_PATH_PREFIX}{service_id}"),
                action: RouteAction::RecordUnhealthy,
            });
        }

        Self { routes }
    }

    /// Look up the route for a request.
    ///
    /// `target` is the raw request-target (path plus any query string),
    /// compared byte-for-byte against each route in order.
    pub fn lookup(&self, method: &Method, target: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.method == *method && route.target == target)
    }

    /// Number of compiled routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True if the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
