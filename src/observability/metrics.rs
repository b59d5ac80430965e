//! Metrics collection and exposition.
//!
//! # Metrics
//! - `poller_checks_total` (counter): checks by endpoint and outcome
//! - `poller_check_duration_seconds` (histogram): check latency per endpoint
//! - `poller_consecutive_errors` (gauge): current failure streak per endpoint
//! - `poller_backoff_seconds` (gauge): last scheduled wait per endpoint
//! - `poller_endpoints_reported` (gauge): endpoints in the last snapshot
//!
//! Recording functions are no-ops until `init_metrics` installs a recorder.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed check.
pub fn record_check(endpoint: &str, success: bool, started: Instant, consecutive_errors: u32) {
    let outcome = if success { "success" } else { "failure" };
    counter!("poller_checks_total", "endpoint" => endpoint.to_string(), "outcome" => outcome)
        .increment(1);
    histogram!("poller_check_duration_seconds", "endpoint" => endpoint.to_string())
        .record(started.elapsed().as_secs_f64());
    gauge!("poller_consecutive_errors", "endpoint" => endpoint.to_string())
        .set(f64::from(consecutive_errors));
}

/// Record the wait scheduled before an endpoint's next check.
pub fn record_backoff(endpoint: &str, delay: Duration) {
    gauge!("poller_backoff_seconds", "endpoint" => endpoint.to_string())
        .set(delay.as_secs_f64());
}

/// Record the size of the snapshot logged on a status tick.
pub fn record_snapshot(endpoints: usize) {
    gauge!("poller_endpoints_reported").set(endpoints as f64);
}
