//! Status simulator server.
//!
//! ```text
//!   status-cli ──GET /status──▶ ┌──────────────┐     ┌────────────────────┐
//!                               │ StatusServer │ ──▶ │ OperationSimulator │
//!   status-cli ◀──{"result"}─── │  (axum)      │ ◀── │ pending → terminal │
//!                               └──────────────┘     └────────────────────┘
//! ```
//!
//! The operation stays `pending` for the configured processing delay, then
//! reports `completed` or `error` once and starts over.

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use status_poller::config::load_or_default;
use status_poller::lifecycle::cancel_on_ctrl_c;
use status_poller::observability::{logging, metrics};
use status_poller::StatusServer;

#[derive(Parser)]
#[command(name = "status-poller")]
#[command(about = "Serve the status of a simulated long-running operation", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen on 0.0.0.0:<PORT>, overriding the config and environment.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.simulator.bind_address = format!("0.0.0.0:{}", port);
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("status-poller v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.simulator.bind_address,
        processing_delay_ms = config.simulator.processing_delay_ms,
        success_probability = config.simulator.success_probability,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.simulator.bind_address).await?;

    let shutdown = CancellationToken::new();
    cancel_on_ctrl_c(shutdown.clone());

    StatusServer::new(&config.simulator).run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
