//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a missing or partial config file still yields
//! a runnable service. The compiled-in defaults reproduce the reference
//! deployment exactly.

use serde::{Deserialize, Serialize};

/// Service id of the default deployment.
pub const DEFAULT_SERVICE_ID: &str = "230f97a2-8e84-4d9b-8246-11caf8e4507a";

/// Router hostname of the default deployment.
pub const DEFAULT_ROUTER_HOST: &str = "finer-snail-230f97.flakery.xyz";

/// Root configuration for the config endpoint service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Contents of the served load-balancer configuration document.
    pub document: DocumentConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "localhost:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "localhost:8080".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured).
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}

/// Source data for the configuration document served on the GET route.
///
/// Held as lists here so a TOML file can express them as `[[document.routers]]`
/// and `[[document.services]]` tables; compiled into the wire-shape maps by
/// [`crate::config::document::ConfigDocument`] at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Router entries: hostname → service reference.
    pub routers: Vec<RouterConfig>,

    /// Service entries: service id → backend server URLs.
    pub services: Vec<ServiceConfig>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            routers: vec![RouterConfig {
                host: DEFAULT_ROUTER_HOST.to_string(),
                service: DEFAULT_SERVICE_ID.to_string(),
            }],
            services: vec![ServiceConfig {
                id: DEFAULT_SERVICE_ID.to_string(),
                servers: vec![
                    "http://10.0.2.112:8080".to_string(),
                    "http://10.0.2.12:8080".to_string(),
                ],
            }],
        }
    }
}

/// A single router entry in the document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouterConfig {
    /// Hostname the router matches.
    pub host: String,

    /// Service id traffic for this hostname is sent to.
    pub service: String,
}

/// A single service entry in the document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Unique service identifier.
    pub id: String,

    /// Backend server URLs, in the order they appear on the wire.
    pub servers: Vec<String>,
}
