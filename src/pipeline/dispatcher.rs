//! Initial dispatch of configured endpoints.

use tokio::sync::mpsc;

use crate::health::Endpoint;

/// Push one fresh `Endpoint` per address into the inbound queue.
///
/// This is the only place endpoints are created. Returns how many were
/// queued; fewer than `addresses.len()` means the queue closed early.
pub async fn dispatch(addresses: Vec<String>, inbound: mpsc::Sender<Endpoint>) -> usize {
    let mut queued = 0;
    for address in addresses {
        if inbound.send(Endpoint::new(address)).await.is_err() {
            tracing::debug!(queued, "Inbound queue closed during dispatch");
            break;
        }
        queued += 1;
    }
    tracing::info!(endpoints = queued, "Endpoints dispatched");
    queued
}
