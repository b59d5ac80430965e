//! Health check transport.
//!
//! # Responsibilities
//! - Define the check capability the worker pool calls
//! - Provide the default HTTP `HEAD` check
//!
//! # Design Decisions
//! - Any HTTP response is a success; its status line is the status string
//! - Only transport errors (DNS, connect, TLS, protocol) are failures
//! - Deadlines are applied by the caller (see `resilience::timeouts`)

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Why a check could not confirm liveness.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// The request could not be completed.
    #[error("{0}")]
    Transport(String),

    /// The check did not finish before its deadline.
    #[error("check timed out after {0:?}")]
    Timeout(Duration),

    /// The address could not be turned into a request.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// A liveness check for a single address.
///
/// Returns a short success descriptor (e.g. `200 OK`) or a `CheckError`.
pub trait HealthCheck: Send + Sync {
    fn check(&self, address: &str) -> impl Future<Output = Result<String, CheckError>> + Send;
}

/// HTTP `HEAD` check backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpChecker {
    client: reqwest::Client,
}

impl HttpChecker {
    /// Create a checker with a default client.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("endpoint-poller/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Create a checker around an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HealthCheck for HttpChecker {
    async fn check(&self, address: &str) -> Result<String, CheckError> {
        let response = self.client.head(address).send().await.map_err(|e| {
            if e.is_builder() {
                CheckError::InvalidAddress(e.to_string())
            } else {
                CheckError::Transport(e.to_string())
            }
        })?;

        Ok(response.status().to_string())
    }
}
