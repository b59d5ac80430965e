//! Endpoint abstraction.
//!
//! # Responsibilities
//! - Represent a single monitored address
//! - Track consecutive check failures (drives backoff)
//!
//! # Ownership
//! An `Endpoint` is moved by value between the inbound queue, a worker and
//! the backoff scheduler. It is deliberately not `Clone`: whoever holds it is
//! the only one allowed to touch its counter.

/// A single monitored endpoint.
#[derive(Debug, PartialEq, Eq)]
pub struct Endpoint {
    address: String,
    consecutive_errors: u32,
}

impl Endpoint {
    /// Create a new endpoint with a clean error counter.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            consecutive_errors: 0,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Failures since the last successful check.
    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }

    /// Report a successful check.
    pub fn record_success(&mut self) {
        self.consecutive_errors = 0;
    }

    /// Report a failed check.
    pub fn record_failure(&mut self) {
        self.consecutive_errors = self.consecutive_errors.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_endpoint_is_clean() {
        let endpoint = Endpoint::new("http://127.0.0.1:3000/");
        assert_eq!(endpoint.address(), "http://127.0.0.1:3000/");
        assert_eq!(endpoint.consecutive_errors(), 0);
    }

    #[test]
    fn test_success_resets_after_failures() {
        let mut endpoint = Endpoint::new("http://127.0.0.1:3000/");
        for expected in 1..=5 {
            endpoint.record_failure();
            assert_eq!(endpoint.consecutive_errors(), expected);
        }

        endpoint.record_success();
        assert_eq!(endpoint.consecutive_errors(), 0);

        endpoint.record_failure();
        assert_eq!(endpoint.consecutive_errors(), 1);
    }

    #[test]
    fn test_failure_count_saturates() {
        let mut endpoint = Endpoint {
            address: "http://127.0.0.1:3000/".to_string(),
            consecutive_errors: u32::MAX,
        };
        endpoint.record_failure();
        assert_eq!(endpoint.consecutive_errors(), u32::MAX);
    }
}
