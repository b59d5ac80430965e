//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::Instant;

use endpoint_poller::health::{CheckError, HealthCheck};

/// Start a mock backend answering every request with `status`.
///
/// Returns the bound address (an ephemeral port on loopback).
pub async fn start_mock_backend(status: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        read_request(&mut socket).await;
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                            status
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a backend that accepts connections but never answers.
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

/// One observed call to a `ScriptedChecker`.
#[derive(Debug, Clone)]
pub struct Call {
    pub address: String,
    pub at: Instant,
}

/// In-memory checker with per-address scripted outcomes.
///
/// Outcomes are consumed in order; once an address's script is exhausted
/// every further check succeeds with `200 OK`. Each check takes `latency`.
/// Tracks concurrency so tests can assert on pool bounds and self-overlap.
#[derive(Default)]
pub struct ScriptedChecker {
    latency: Duration,
    scripts: Mutex<HashMap<String, VecDeque<Result<String, CheckError>>>>,
    calls: Mutex<Vec<Call>>,
    active: Mutex<HashMap<String, usize>>,
    overlaps: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedChecker {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn script(self, address: &str, outcomes: Vec<Result<String, CheckError>>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(address.to_string(), outcomes.into());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, address: &str) -> Vec<Instant> {
        self.calls()
            .into_iter()
            .filter(|c| c.address == address)
            .map(|c| c.at)
            .collect()
    }

    /// Times a check started while another check of the same address ran.
    pub fn overlaps(&self) -> usize {
        self.overlaps.load(Ordering::SeqCst)
    }

    /// Most checks ever running at once.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn enter(&self, address: &str) {
        self.calls.lock().unwrap().push(Call {
            address: address.to_string(),
            at: Instant::now(),
        });

        let mut active = self.active.lock().unwrap();
        let count = active.entry(address.to_string()).or_default();
        *count += 1;
        if *count > 1 {
            self.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        drop(active);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self, address: &str) {
        if let Some(count) = self.active.lock().unwrap().get_mut(address) {
            *count -= 1;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl HealthCheck for ScriptedChecker {
    async fn check(&self, address: &str) -> Result<String, CheckError> {
        self.enter(address);
        tokio::time::sleep(self.latency).await;

        let outcome = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(address)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok("200 OK".to_string()));

        self.exit(address);
        outcome
    }
}

/// Wrapper so tests can keep inspecting a checker the poller owns.
pub struct Shared(pub Arc<ScriptedChecker>);

impl HealthCheck for Shared {
    async fn check(&self, address: &str) -> Result<String, CheckError> {
        self.0.check(address).await
    }
}
