use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use status_poller::config::validation::validate_config;
use status_poller::config::{read_config, AppConfig, ConfigError};
use status_poller::lifecycle::{cancel_after, cancel_on_ctrl_c};
use status_poller::observability::{logging, metrics};
use status_poller::http_poller;

#[derive(Parser)]
#[command(name = "status-cli")]
#[command(about = "Poll a status server until the operation finishes", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the status server.
    #[arg(short, long)]
    url: Option<String>,

    /// Initial delay between polls in milliseconds.
    #[arg(long)]
    initial_ms: Option<u64>,

    /// Maximum delay between polls in milliseconds.
    #[arg(long)]
    max_ms: Option<u64>,

    /// Total polling budget in milliseconds.
    #[arg(long)]
    total_ms: Option<u64>,

    /// Backoff multiplier applied after every pending poll.
    #[arg(long)]
    multiplier: Option<f64>,

    /// Hard deadline for the whole run in seconds.
    #[arg(long, default_value_t = 120)]
    deadline_secs: u64,
}

/// File values (or defaults), then flags, then one validation pass.
///
/// The simulator's `PORT` override does not apply to the client.
fn build_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => AppConfig::default(),
    };

    let client = &mut config.client;
    if let Some(url) = &cli.url {
        client.base_url = url.clone();
    }
    if let Some(ms) = cli.initial_ms {
        client.initial_interval_ms = ms;
    }
    if let Some(ms) = cli.max_ms {
        client.max_interval_ms = ms;
    }
    if let Some(ms) = cli.total_ms {
        client.max_total_ms = ms;
    }
    if let Some(multiplier) = cli.multiplier {
        client.backoff_multiplier = multiplier;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = build_config(&cli)?;

    logging::init_logging(&config.observability.log_level);
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let poller = http_poller(&config.client)?;
    tracing::info!(
        url = %poller.probe().status_url(),
        config = ?poller.config(),
        "Polling for result"
    );

    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());
    cancel_after(cancel.clone(), Duration::from_secs(cli.deadline_secs));

    match poller.wait_for_result(&cancel).await {
        Ok(status) => {
            println!("{}", status);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Failed to get result: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("status-cli-{}-{}.toml", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_flags_replace_invalid_file_values() {
        let path = temp_config("override", "[client]\ninitial_interval_ms = 0\n");
        let cli = Cli::parse_from([
            "status-cli",
            "--config",
            path.to_str().unwrap(),
            "--initial-ms",
            "500",
        ]);

        let config = build_config(&cli);
        fs::remove_file(&path).unwrap();

        assert_eq!(config.unwrap().client.initial_interval_ms, 500);
    }

    #[test]
    fn test_invalid_value_left_in_place_is_rejected() {
        let path = temp_config("invalid", "[client]\ninitial_interval_ms = 0\n");
        let cli = Cli::parse_from(["status-cli", "--config", path.to_str().unwrap()]);

        let err = build_config(&cli).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
    }

    #[test]
    fn test_simulator_port_does_not_affect_client() {
        let path = temp_config("port", "[simulator]\nbind_address = \"0.0.0.0:7000\"\n");
        let cli = Cli::parse_from([
            "status-cli",
            "--config",
            path.to_str().unwrap(),
            "--url",
            "http://127.0.0.1:7000",
        ]);

        let config = build_config(&cli).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.client.base_url, "http://127.0.0.1:7000");
        assert_eq!(config.simulator.bind_address, "0.0.0.0:7000");
    }
}
