//! Wire types for the served configuration document.
//!
//! # Responsibilities
//! - Define the exact JSON shape consumers expect
//! - Compile the list-based [`DocumentConfig`] into the map-based wire shape
//! - Render the document to bytes once, at startup
//!
//! # Design Decisions
//! - Map keys live in `BTreeMap`s so serialization is deterministic across
//!   calls and across process restarts
//! - Struct field order fixes the `http` → `routers` → `services` nesting
//! - Rendering happens once; the handler serves the same bytes verbatim,
//!   so repeated responses are byte-identical by construction

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::schema::DocumentConfig;

/// The load-balancer configuration document, in wire shape.
///
/// Immutable after startup; constructed from [`DocumentConfig`] exactly once.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConfigDocument {
    pub http: HttpSection,
}

/// The `http` section: routers and the services they reference.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HttpSection {
    /// Hostname → service reference.
    pub routers: BTreeMap<String, RouterEntry>,

    /// Service id → backend servers.
    pub services: BTreeMap<String, ServiceEntry>,
}

/// A router entry referencing a service by id.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouterEntry {
    pub service: String,
}

/// A service entry listing its backend servers.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServiceEntry {
    pub servers: Vec<ServerEntry>,
}

/// A single backend server.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServerEntry {
    pub url: String,
}

impl ConfigDocument {
    /// Compile the configured router and service lists into wire shape.
    pub fn from_config(config: &DocumentConfig) -> Self {
        let routers = config
            .routers
            .iter()
            .map(|r| {
                (
                    r.host.clone(),
                    RouterEntry {
                        service: r.service.clone(),
                    },
                )
            })
            .collect();

        let services = config
            .services
            .iter()
            .map(|s| {
                (
                    s.id.clone(),
                    ServiceEntry {
                        servers: s
                            .servers
                            .iter()
                            .map(|url| ServerEntry { url: url.clone() })
                            .collect(),
                    },
                )
            })
            .collect();

        Self {
            http: HttpSection { routers, services },
        }
    }

    /// Serialize the document to the bytes served on the GET route.
    pub fn render(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Iterate the service ids, in serialization order.
    pub fn service_ids(&self) -> impl Iterator<Item = &str> {
        self.http.services.keys().map(String::as_str)
    }
}
