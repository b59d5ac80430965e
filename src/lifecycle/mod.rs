//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Spawn pipeline
//!
//! Shutdown (shutdown.rs):
//!     Signal received → trigger() → every task leaves its select loop
//!     → PollerHandle::join() returns
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then observability, then the pipeline
//! - Shutdown is observed at every suspension point, not only between checks

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
