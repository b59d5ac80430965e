//! Polling pipeline.
//!
//! # Data Flow
//! ```text
//!  dispatcher.rs ──seed once──▶ inbound queue ◀──────────────┐
//!                                    │                         │
//!                                    ▼                         │
//!                           worker.rs (N workers)              │
//!                             │              │                 │
//!                     StatusEvent        Endpoint              │
//!                             ▼              ▼                 │
//!                    aggregator.rs     scheduler.rs ──delay────┘
//!                    (snapshot actor)  (linear backoff)
//! ```
//!
//! # Design Decisions
//! - An endpoint exists exactly once and moves by value through the loop, so
//!   it can never be checked twice at the same time
//! - The inbound queue holds one slot per endpoint; sends into it never wait
//!   for space
//! - Every task selects on the shutdown signal at each suspension point

pub mod aggregator;
pub mod dispatcher;
pub mod scheduler;
pub mod worker;

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::config::{PollerConfig, Timings};
use crate::health::HealthCheck;
use crate::lifecycle::Shutdown;

pub use aggregator::{render_snapshot, StateMonitor, StateMonitorHandle, StatusEvent};
pub use scheduler::BackoffScheduler;
pub use worker::{InboundQueue, Worker};

/// A configured, not yet running, polling pipeline.
pub struct Poller<C> {
    endpoints: Vec<String>,
    workers: usize,
    timings: Timings,
    checker: Arc<C>,
}

impl<C: HealthCheck + 'static> Poller<C> {
    pub fn new(endpoints: Vec<String>, workers: usize, timings: Timings, checker: C) -> Self {
        Self {
            endpoints,
            workers,
            timings,
            checker: Arc::new(checker),
        }
    }

    /// Build a pipeline from a validated configuration.
    pub fn from_config(config: &PollerConfig, checker: C) -> Self {
        Self::new(
            config.endpoints.clone(),
            config.poller.workers,
            config.poller.timings(),
            checker,
        )
    }

    /// Spawn the aggregator, workers, scheduler and dispatcher.
    pub fn spawn(self, shutdown: &Shutdown) -> PollerHandle {
        let capacity = self.endpoints.len().max(1);
        let (inbound_tx, inbound_rx) = mpsc::channel(capacity);
        let (completed_tx, completed_rx) = mpsc::channel(capacity);
        let inbound: InboundQueue = Arc::new(Mutex::new(inbound_rx));

        let (state, aggregator) =
            StateMonitor::spawn(self.timings.status_interval, capacity, shutdown.subscribe());
        let mut tasks = vec![aggregator];

        for id in 0..self.workers {
            let worker = Worker::new(
                id,
                self.checker.clone(),
                inbound.clone(),
                state.sender(),
                completed_tx.clone(),
                self.timings.check_timeout,
                shutdown.subscribe(),
            );
            tasks.push(tokio::spawn(worker.run()));
        }

        let scheduler = BackoffScheduler::new(
            completed_rx,
            inbound_tx.clone(),
            self.timings.poll_interval,
            self.timings.error_backoff,
            shutdown.subscribe(),
        );
        tasks.push(tokio::spawn(scheduler.run()));

        let endpoints = self.endpoints;
        tasks.push(tokio::spawn(async move {
            dispatcher::dispatch(endpoints, inbound_tx).await;
        }));

        tracing::info!(
            workers = self.workers,
            poll_interval = ?self.timings.poll_interval,
            status_interval = ?self.timings.status_interval,
            error_backoff = ?self.timings.error_backoff,
            check_timeout = ?self.timings.check_timeout,
            "Poller started"
        );

        PollerHandle { state, tasks }
    }
}

/// Handle to a running pipeline.
pub struct PollerHandle {
    state: StateMonitorHandle,
    tasks: Vec<JoinHandle<()>>,
}

impl PollerHandle {
    /// The aggregator, for snapshot queries.
    pub fn state(&self) -> &StateMonitorHandle {
        &self.state
    }

    /// Wait for every pipeline task to finish (after shutdown is triggered).
    pub async fn join(self) {
        for result in join_all(self.tasks).await {
            if let Err(e) = result {
                tracing::error!(error = %e, "Pipeline task failed");
            }
        }
        tracing::info!("Poller stopped");
    }
}
