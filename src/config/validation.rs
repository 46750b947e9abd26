//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and formats.
//! Every problem is reported, not just the first.

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("client.backoff_multiplier must be a positive finite number, got {0}")]
    InvalidMultiplier(f64),

    #[error("client.base_url '{url}' is invalid: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("simulator.success_probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("{field} '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },
}

/// Check the whole configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let client = &config.client;

    for (field, value) in [
        ("client.initial_interval_ms", client.initial_interval_ms),
        ("client.max_interval_ms", client.max_interval_ms),
        ("client.max_total_ms", client.max_total_ms),
        ("client.request_timeout_ms", client.request_timeout_ms),
        ("simulator.request_timeout_secs", config.simulator.request_timeout_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::NotPositive { field });
        }
    }

    if !client.backoff_multiplier.is_finite() || client.backoff_multiplier <= 0.0 {
        errors.push(ValidationError::InvalidMultiplier(client.backoff_multiplier));
    }

    match Url::parse(&client.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidBaseUrl {
            url: client.base_url.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidBaseUrl {
            url: client.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    let probability = config.simulator.success_probability;
    if !(0.0..=1.0).contains(&probability) {
        errors.push(ValidationError::InvalidProbability(probability));
    }

    if config.simulator.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "simulator.bind_address",
            value: config.simulator.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
