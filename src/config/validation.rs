//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (routers reference existing services)
//! - Validate backend server URLs parse
//! - Detect duplicate service ids
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener bind_address must not be empty")]
    EmptyBindAddress,

    #[error("duplicate service id `{0}`")]
    DuplicateServiceId(String),

    #[error("router `{host}` references unknown service `{service}`")]
    DanglingServiceReference { host: String, service: String },

    #[error("service `{service}` has invalid server url `{url}`: {reason}")]
    InvalidServerUrl {
        service: String,
        url: String,
        reason: url::ParseError,
    },
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }

    let mut service_ids: HashSet<&str> = HashSet::new();
    for service in &config.document.services {
        if !service_ids.insert(&service.id) {
            errors.push(ValidationError::DuplicateServiceId(service.id.clone()));
        }
        for url in &service.servers {
            if let Err(reason) = Url::parse(url) {
                errors.push(ValidationError::InvalidServerUrl {
                    service: service.id.clone(),
                    url: url.clone(),
                    reason,
                });
            }
        }
    }

    for router in &config.document.routers {
        if !service_ids.contains(router.service.as_str()) {
            errors.push(ValidationError::DanglingServiceReference {
                host: router.host.clone(),
                service: router.service.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
