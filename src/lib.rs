//! Endpoint Poller Library

pub mod config;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;
pub mod resilience;

pub use config::PollerConfig;
pub use lifecycle::Shutdown;
pub use pipeline::{Poller, PollerHandle};
