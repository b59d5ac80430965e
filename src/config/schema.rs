//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the poller.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the endpoint poller.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Addresses to health-check, in dispatch order.
    pub endpoints: Vec<String>,

    /// Worker pool and timing settings.
    pub poller: PollerSettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            endpoints: vec![
                "http://www.google.com/".to_string(),
                "http://www.golang.org/".to_string(),
                "http://blog.golang.org".to_string(),
            ],
            poller: PollerSettings::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Worker pool and timing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollerSettings {
    /// Number of concurrent check workers.
    pub workers: usize,

    /// Baseline wait between checks of the same endpoint, in seconds.
    pub poll_interval_secs: u64,

    /// How often the current state is logged, in seconds.
    pub status_interval_secs: u64,

    /// Extra wait added per consecutive failure, in seconds.
    pub error_backoff_secs: u64,

    /// Deadline for a single check, in seconds.
    pub check_timeout_secs: u64,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            workers: 2,
            poll_interval_secs: 60,
            status_interval_secs: 10,
            error_backoff_secs: 10,
            check_timeout_secs: 10,
        }
    }
}

impl PollerSettings {
    /// Duration form of the timing fields, as consumed by the pipeline.
    pub fn timings(&self) -> Timings {
        Timings {
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            status_interval: Duration::from_secs(self.status_interval_secs),
            error_backoff: Duration::from_secs(self.error_backoff_secs),
            check_timeout: Duration::from_secs(self.check_timeout_secs),
        }
    }
}

/// Pipeline timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub poll_interval: Duration,
    pub status_interval: Duration,
    pub error_backoff: Duration,
    pub check_timeout: Duration,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
