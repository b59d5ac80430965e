//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Endpoint (endpoint.rs)
//!     → checker.rs (HEAD check, status line or CheckError)
//!     → Endpoint counter updated by the worker that owns it
//! ```
//!
//! # Design Decisions
//! - The transport sits behind the `HealthCheck` trait so the pipeline can
//!   be driven by any checker
//! - Health state is per-endpoint and travels with the endpoint itself

pub mod checker;
pub mod endpoint;

pub use checker::{CheckError, HealthCheck, HttpChecker};
pub use endpoint::Endpoint;
