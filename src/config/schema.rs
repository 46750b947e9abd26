//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files. Every
//! section and field has a default, so an empty file is a valid config.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration shared by the server and the polling client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Polling client settings.
    pub client: PollerConfig,

    /// Operation simulator and its HTTP listener.
    pub simulator: SimulatorConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Polling client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Base URL of the status server; `/status` is appended.
    pub base_url: String,

    /// Delay before the second poll, in milliseconds.
    pub initial_interval_ms: u64,

    /// Upper bound on the delay between polls, in milliseconds.
    pub max_interval_ms: u64,

    /// Total time budget for one polling session, in milliseconds.
    pub max_total_ms: u64,

    /// Factor applied to the delay after every pending poll.
    pub backoff_multiplier: f64,

    /// Timeout of a single status request, in milliseconds.
    pub request_timeout_ms: u64,
}

impl PollerConfig {
    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    pub fn max_interval(&self) -> Duration {
        Duration::from_millis(self.max_interval_ms)
    }

    pub fn max_total_duration(&self) -> Duration {
        Duration::from_millis(self.max_total_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            initial_interval_ms: 1_000,
            max_interval_ms: 5_000,
            max_total_ms: 30_000,
            backoff_multiplier: 2.0,
            request_timeout_ms: 5_000,
        }
    }
}

/// Operation simulator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Time an operation stays pending, in milliseconds.
    pub processing_delay_ms: u64,

    /// Fraction of finished operations that report `completed`.
    pub success_probability: f64,

    /// Optional RNG seed for a reproducible outcome sequence.
    pub seed: Option<u64>,

    /// Per-request timeout of the HTTP server in seconds.
    pub request_timeout_secs: u64,
}

impl SimulatorConfig {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            processing_delay_ms: 8_000,
            success_probability: 0.9,
            seed: None,
            request_timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
