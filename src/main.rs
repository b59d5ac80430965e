//! Endpoint Poller (v1)
//!
//! Continuously health-checks a fixed set of endpoints and periodically logs
//! the last known status of each.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                        ENDPOINT POLLER                        │
//!   │                                                               │
//!   │  ┌────────────┐    ┌──────────────┐    ┌──────────────────┐   │
//!   │  │ dispatcher │───▶│ inbound queue│───▶│  worker pool (N) │───┼──▶ HEAD <endpoint>
//!   │  └────────────┘    └──────▲───────┘    └───┬──────────┬───┘   │
//!   │                           │                │          │       │
//!   │                    ┌──────┴───────┐  Endpoint    StatusEvent  │
//!   │                    │   backoff    │◀───────┘          │       │
//!   │                    │  scheduler   │                   ▼       │
//!   │                    └──────────────┘          ┌──────────────┐ │
//!   │                                              │ state monitor│─┼──▶ "Current state:"
//!   │                                              └──────────────┘ │
//!   │  ┌─────────────────────────────────────────────────────────┐  │
//!   │  │ config · observability · resilience · lifecycle         │  │
//!   │  └─────────────────────────────────────────────────────────┘  │
//!   └──────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use endpoint_poller::config::validation::validate_config;
use endpoint_poller::config::{load_config, ConfigError, PollerConfig};
use endpoint_poller::health::HttpChecker;
use endpoint_poller::lifecycle::{signals, Shutdown};
use endpoint_poller::observability::{logging, metrics};
use endpoint_poller::Poller;

#[derive(Parser)]
#[command(name = "endpoint-poller")]
#[command(about = "Continuously health-check a fixed set of endpoints", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (built-in defaults when omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Validate the configuration and exit.
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            let config = PollerConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            config
        }
    };

    if cli.check_config {
        println!("Configuration OK: {} endpoint(s)", config.endpoints.len());
        return Ok(());
    }

    logging::init_logging(&config.observability);
    tracing::info!("endpoint-poller v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        endpoints = config.endpoints.len(),
        workers = config.poller.workers,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let checker = HttpChecker::new()?;
    let shutdown = Shutdown::new();
    let poller = Poller::from_config(&config, checker).spawn(&shutdown);

    signals::wait_for_signal().await?;
    shutdown.trigger();
    poller.join().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
