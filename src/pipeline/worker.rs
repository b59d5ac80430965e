//! Check workers.
//!
//! # Responsibilities
//! - Pull endpoints from the shared inbound queue
//! - Run the health check under its deadline
//! - Update the endpoint's error counter
//! - Report the status to the aggregator and hand the endpoint to the scheduler
//!
//! # Design Decisions
//! - Workers share one receiver; the lock is held only while waiting for the
//!   next endpoint, never during a check
//! - Every received endpoint yields exactly one event and one hand-off

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, Mutex};

use crate::health::{Endpoint, HealthCheck};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::pipeline::aggregator::StatusEvent;
use crate::resilience::with_deadline;

/// Inbound queue shared by every worker.
pub type InboundQueue = Arc<Mutex<mpsc::Receiver<Endpoint>>>;

/// A single member of the worker pool.
pub struct Worker<C> {
    id: usize,
    checker: Arc<C>,
    inbound: InboundQueue,
    events: mpsc::Sender<StatusEvent>,
    completed: mpsc::Sender<Endpoint>,
    check_timeout: Duration,
    shutdown: ShutdownSignal,
}

impl<C: HealthCheck + 'static> Worker<C> {
    pub fn new(
        id: usize,
        checker: Arc<C>,
        inbound: InboundQueue,
        events: mpsc::Sender<StatusEvent>,
        completed: mpsc::Sender<Endpoint>,
        check_timeout: Duration,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            id,
            checker,
            inbound,
            events,
            completed,
            check_timeout,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        tracing::debug!(worker = self.id, "Worker starting");

        loop {
            let next = tokio::select! {
                _ = self.shutdown.recv() => break,
                next = next_endpoint(&self.inbound) => next,
            };
            let Some(mut endpoint) = next else {
                tracing::debug!(worker = self.id, "Inbound queue closed");
                break;
            };

            let status = tokio::select! {
                _ = self.shutdown.recv() => break,
                status = check_endpoint(self.checker.as_ref(), self.check_timeout, &mut endpoint) => status,
            };

            let event = StatusEvent {
                address: endpoint.address().to_string(),
                status,
            };
            if self.events.send(event).await.is_err() {
                tracing::debug!(worker = self.id, "State monitor gone");
                break;
            }
            if self.completed.send(endpoint).await.is_err() {
                tracing::debug!(worker = self.id, "Scheduler gone");
                break;
            }
        }

        tracing::debug!(worker = self.id, "Worker stopped");
    }
}

async fn next_endpoint(inbound: &InboundQueue) -> Option<Endpoint> {
    inbound.lock().await.recv().await
}

/// Check one endpoint, update its counter and return the status string.
pub async fn check_endpoint<C: HealthCheck>(
    checker: &C,
    deadline: Duration,
    endpoint: &mut Endpoint,
) -> String {
    let started = Instant::now();
    let result = with_deadline(deadline, checker.check(endpoint.address())).await;

    let (success, status) = match result {
        Ok(status) => {
            endpoint.record_success();
            (true, status)
        }
        Err(e) => {
            tracing::warn!(address = %endpoint.address(), error = %e, "Health check failed");
            endpoint.record_failure();
            (false, e.to_string())
        }
    };

    metrics::record_check(
        endpoint.address(),
        success,
        started,
        endpoint.consecutive_errors(),
    );
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::CheckError;

    struct Fixed(Result<String, CheckError>);

    impl HealthCheck for Fixed {
        async fn check(&self, _address: &str) -> Result<String, CheckError> {
            self.0.clone()
        }
    }

    struct Hangs;

    impl HealthCheck for Hangs {
        async fn check(&self, _address: &str) -> Result<String, CheckError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_success_resets_counter() {
        let mut endpoint = Endpoint::new("http://a.example/");
        endpoint.record_failure();
        endpoint.record_failure();

        let checker = Fixed(Ok("200 OK".to_string()));
        let status = check_endpoint(&checker, Duration::from_secs(1), &mut endpoint).await;

        assert_eq!(status, "200 OK");
        assert_eq!(endpoint.consecutive_errors(), 0);
    }

    #[tokio::test]
    async fn test_failure_reports_message() {
        let mut endpoint = Endpoint::new("http://a.example/");
        let checker = Fixed(Err(CheckError::Transport("connection refused".to_string())));

        let status = check_endpoint(&checker, Duration::from_secs(1), &mut endpoint).await;
        assert_eq!(status, "connection refused");
        assert_eq!(endpoint.consecutive_errors(), 1);

        check_endpoint(&checker, Duration::from_secs(1), &mut endpoint).await;
        assert_eq!(endpoint.consecutive_errors(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_check_counts_as_failure() {
        let mut endpoint = Endpoint::new("http://a.example/");
        let status = check_endpoint(&Hangs, Duration::from_secs(3), &mut endpoint).await;
        assert_eq!(status, "check timed out after 3s");
        assert_eq!(endpoint.consecutive_errors(), 1);
    }
}
