//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate endpoint addresses (absolute http/https URLs, no duplicates)
//! - Validate value ranges (intervals between 1s and one day, at least one worker)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PollerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::PollerConfig;

/// Longest accepted interval or timeout: one day.
pub const MAX_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no endpoints configured")]
    NoEndpoints,

    #[error("invalid endpoint {address:?}: {reason}")]
    InvalidEndpoint { address: String, reason: String },

    #[error("duplicate endpoint {0:?}")]
    DuplicateEndpoint(String),

    #[error("poller.workers must be at least 1")]
    NoWorkers,

    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),

    #[error("{0} must be at most {MAX_INTERVAL_SECS} seconds")]
    IntervalTooLarge(&'static str),

    #[error("invalid metrics address {0:?}")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &PollerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.endpoints.is_empty() {
        errors.push(ValidationError::NoEndpoints);
    }

    let mut seen = HashSet::new();
    for address in &config.endpoints {
        if let Err(reason) = check_endpoint(address) {
            errors.push(ValidationError::InvalidEndpoint {
                address: address.clone(),
                reason,
            });
        }
        if !seen.insert(address.as_str()) {
            errors.push(ValidationError::DuplicateEndpoint(address.clone()));
        }
    }

    let poller = &config.poller;
    if poller.workers == 0 {
        errors.push(ValidationError::NoWorkers);
    }
    let intervals = [
        ("poller.poll_interval_secs", poller.poll_interval_secs),
        ("poller.status_interval_secs", poller.status_interval_secs),
        ("poller.check_timeout_secs", poller.check_timeout_secs),
    ];
    for (field, secs) in intervals {
        if secs == 0 {
            errors.push(ValidationError::ZeroInterval(field));
        } else if secs > MAX_INTERVAL_SECS {
            errors.push(ValidationError::IntervalTooLarge(field));
        }
    }
    if poller.error_backoff_secs > MAX_INTERVAL_SECS {
        errors.push(ValidationError::IntervalTooLarge("poller.error_backoff_secs"));
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_endpoint(address: &str) -> Result<(), String> {
    let url = Url::parse(address).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme {:?}", url.scheme()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err("missing host".to_string());
    }
    Ok(())
}
