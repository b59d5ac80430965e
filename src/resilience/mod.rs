//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Health check issued by a worker:
//!     → timeouts.rs (enforce the per-check deadline)
//!     → On completion: backoff.rs (size the wait before the next check)
//! ```
//!
//! # Design Decisions
//! - Every check has a deadline; a hung check occupies a worker for at most
//!   `check_timeout`
//! - Backoff is linear in consecutive failures, without jitter or cap
//! - Failures never stop an endpoint from being retried

pub mod backoff;
pub mod timeouts;

pub use backoff::backoff_delay;
pub use timeouts::with_deadline;
