//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval and timeout > 0)
//! - Check the metrics path is a plain route that does not shadow the health endpoint
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ExporterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::ExporterConfig;
use crate::http::HEALTH_PATH;
use crate::net::resolve_listen_address;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("metrics path {0:?} must start with '/'")]
    MetricsPathNotAbsolute(String),

    #[error("metrics path {0:?} must not contain route parameters")]
    MetricsPathHasParameters(String),

    #[error("metrics path {0:?} is reserved for the health endpoint")]
    MetricsPathReserved(String),

    #[error("invalid listen address {address:?}: {reason}")]
    ListenAddress { address: String, reason: String },

    #[error("poller interval must be greater than zero")]
    ZeroInterval,

    #[error("probe timeout must be greater than zero")]
    ZeroProbeTimeout,

    #[error("probe command must not be empty")]
    EmptyProbeCommand,
}

/// Whether axum would read part of `path` as a parameter or wildcard.
fn has_route_parameters(path: &str) -> bool {
    path.contains(['{', '}'])
        || path
            .split('/')
            .any(|segment| segment.starts_with('*') || segment.starts_with(':'))
}

/// Check an assembled configuration.
pub fn validate_config(config: &ExporterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let path = &config.metrics.path;
    if !path.starts_with('/') {
        errors.push(ValidationError::MetricsPathNotAbsolute(path.clone()));
    } else if has_route_parameters(path) {
        errors.push(ValidationError::MetricsPathHasParameters(path.clone()));
    } else if path == HEALTH_PATH {
        errors.push(ValidationError::MetricsPathReserved(path.clone()));
    }

    if let Err(e) = resolve_listen_address(&config.listener.listen_address) {
        errors.push(ValidationError::ListenAddress {
            address: config.listener.listen_address.clone(),
            reason: e.to_string(),
        });
    }

    if config.poller.interval_ms == 0 {
        errors.push(ValidationError::ZeroInterval);
    }

    if config.probe.timeout_ms == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }

    if config.probe.command.trim().is_empty() {
        errors.push(ValidationError::EmptyProbeCommand);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
