//! State aggregator actor.
//!
//! A single task owns the map of endpoint → last status. Workers reach it
//! only through the event channel, so every write is serialized by the
//! channel and no lock guards the map.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;

/// Outcome of one check, addressed to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub address: String,
    pub status: String,
}

/// Requests answered by the aggregator.
#[derive(Debug)]
enum StateQuery {
    /// Copy of the current snapshot.
    Snapshot {
        response: oneshot::Sender<HashMap<String, String>>,
    },
}

/// Handle for talking to a running `StateMonitor`.
#[derive(Debug, Clone)]
pub struct StateMonitorHandle {
    events: mpsc::Sender<StatusEvent>,
    queries: mpsc::Sender<StateQuery>,
}

impl StateMonitorHandle {
    /// Sender the workers report through.
    pub fn sender(&self) -> mpsc::Sender<StatusEvent> {
        self.events.clone()
    }

    /// Report a status. Returns false once the aggregator has stopped.
    pub async fn report(&self, event: StatusEvent) -> bool {
        self.events.send(event).await.is_ok()
    }

    /// Current snapshot, or `None` once the aggregator has stopped.
    pub async fn snapshot(&self) -> Option<HashMap<String, String>> {
        let (response, rx) = oneshot::channel();
        self.queries
            .send(StateQuery::Snapshot { response })
            .await
            .ok()?;
        rx.await.ok()
    }
}

/// Actor owning the status snapshot.
pub struct StateMonitor {
    statuses: HashMap<String, String>,
    events: mpsc::Receiver<StatusEvent>,
    queries: mpsc::Receiver<StateQuery>,
    status_interval: Duration,
    shutdown: ShutdownSignal,
}

impl StateMonitor {
    /// Spawn the aggregator.
    ///
    /// `buffer` bounds the event channel; the query channel is small since
    /// queries are answered immediately.
    pub fn spawn(
        status_interval: Duration,
        buffer: usize,
        shutdown: ShutdownSignal,
    ) -> (StateMonitorHandle, JoinHandle<()>) {
        let (events_tx, events) = mpsc::channel(buffer.max(1));
        let (queries_tx, queries) = mpsc::channel(8);

        let monitor = Self {
            statuses: HashMap::new(),
            events,
            queries,
            status_interval,
            shutdown,
        };
        let task = tokio::spawn(monitor.run());

        let handle = StateMonitorHandle {
            events: events_tx,
            queries: queries_tx,
        };
        (handle, task)
    }

    async fn run(mut self) {
        tracing::debug!(interval = ?self.status_interval, "State monitor starting");

        let mut ticker = Instant::now()
            .checked_add(self.status_interval)
            .map(|start| {
                let mut ticker = time::interval_at(start, self.status_interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                ticker
            });
        if ticker.is_none() {
            tracing::error!(
                interval = ?self.status_interval,
                "Status interval out of range, periodic state logging disabled"
            );
        }

        loop {
            tokio::select! {
                _ = self.shutdown.recv() => {
                    tracing::debug!("State monitor received shutdown signal, exiting loop");
                    break;
                }
                _ = next_tick(&mut ticker) => {
                    self.log_state();
                }
                event = self.events.recv() => match event {
                    Some(event) => self.apply(event),
                    None => {
                        tracing::debug!("All status reporters gone, state monitor exiting");
                        break;
                    }
                },
                Some(query) = self.queries.recv() => {
                    self.answer(query);
                }
            }
        }
    }

    fn apply(&mut self, event: StatusEvent) {
        self.statuses.insert(event.address, event.status);
    }

    fn answer(&self, query: StateQuery) {
        match query {
            StateQuery::Snapshot { response } => {
                let _ = response.send(self.statuses.clone());
            }
        }
    }

    fn log_state(&self) {
        metrics::record_snapshot(self.statuses.len());
        for line in render_snapshot(&self.statuses) {
            tracing::info!("{}", line);
        }
    }
}

/// Resolves on the next tick, or never when there is no ticker.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Lines logged for one status tick: a header, then `<address> <status>`
/// per endpoint, sorted by address.
pub fn render_snapshot(statuses: &HashMap<String, String>) -> Vec<String> {
    let mut entries: Vec<_> = statuses.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push("Current state:".to_string());
    lines.extend(
        entries
            .into_iter()
            .map(|(address, status)| format!("{address} {status}")),
    );
    lines
}
