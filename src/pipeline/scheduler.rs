//! Backoff scheduler.
//!
//! Receives endpoints that just finished a check, waits
//! `poll_interval + error_backoff * consecutive_errors`, then puts them back
//! on the inbound queue. Each wait is its own task, so a long backoff never
//! holds up other endpoints or the workers.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tokio::time;

use crate::health::Endpoint;
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::resilience::backoff_delay;

pub struct BackoffScheduler {
    completed: mpsc::Receiver<Endpoint>,
    inbound: mpsc::Sender<Endpoint>,
    poll_interval: Duration,
    error_backoff: Duration,
    shutdown: ShutdownSignal,
}

impl BackoffScheduler {
    pub fn new(
        completed: mpsc::Receiver<Endpoint>,
        inbound: mpsc::Sender<Endpoint>,
        poll_interval: Duration,
        error_backoff: Duration,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            completed,
            inbound,
            poll_interval,
            error_backoff,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        tracing::debug!(
            poll_interval = ?self.poll_interval,
            error_backoff = ?self.error_backoff,
            "Backoff scheduler starting"
        );

        // One pending wait per endpoint at most; reaped as they finish.
        let mut waits = JoinSet::new();

        loop {
            tokio::select! {
                _ = self.shutdown.recv() => {
                    tracing::debug!("Backoff scheduler received shutdown signal, exiting loop");
                    break;
                }
                next = self.completed.recv() => match next {
                    Some(endpoint) => self.schedule(&mut waits, endpoint),
                    None => {
                        tracing::debug!("All workers gone, backoff scheduler exiting");
                        break;
                    }
                },
                Some(result) = waits.join_next() => reap(result),
            }
        }

        // Pending waits observe the same signal and finish promptly.
        while let Some(result) = waits.join_next().await {
            reap(result);
        }
    }

    fn schedule(&self, waits: &mut JoinSet<()>, endpoint: Endpoint) {
        let delay = backoff_delay(
            self.poll_interval,
            self.error_backoff,
            endpoint.consecutive_errors(),
        );
        metrics::record_backoff(endpoint.address(), delay);
        tracing::debug!(
            address = %endpoint.address(),
            errors = endpoint.consecutive_errors(),
            delay = ?delay,
            "Scheduling next check"
        );

        let inbound = self.inbound.clone();
        let mut shutdown = self.shutdown.clone();
        waits.spawn(async move {
            tokio::select! {
                _ = shutdown.recv() => {}
                _ = time::sleep(delay) => {
                    if let Err(e) = inbound.send(endpoint).await {
                        tracing::debug!(address = %e.0.address(), "Inbound queue closed, dropping endpoint");
                    }
                }
            }
        });
    }
}

fn reap(result: Result<(), JoinError>) {
    if let Err(e) = result {
        tracing::error!(error = %e, "Backoff wait task failed");
    }
}
