//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable {var}='{value}' is invalid")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Port override for the simulator listener.
pub const PORT_ENV: &str = "PORT";

/// Parse a TOML file as-is: no environment overrides, no validation.
///
/// For callers that layer their own overrides before validating once.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load a TOML file, apply environment overrides and validate.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let mut config = read_config(path)?;

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load from `path` if given, otherwise start from defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = AppConfig::default();
            apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}

/// Apply overrides read through `lookup`.
///
/// `PORT` rebinds the simulator to all interfaces on that port.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(PORT_ENV) {
        let port: u16 = value.trim().parse().map_err(|_| ConfigError::Env {
            var: PORT_ENV,
            value: value.clone(),
        })?;
        config.simulator.bind_address = format!("0.0.0.0:{}", port);
        tracing::debug!(port, "Simulator port overridden from environment");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_port_override() {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, |var| (var == PORT_ENV).then(|| "9191".to_string()))
            .unwrap();
        assert_eq!(config.simulator.bind_address, "0.0.0.0:9191");
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = AppConfig::default();
        let err = apply_env_overrides(&mut config, |_| Some("eighty".to_string())).unwrap_err();
        assert_eq!(err.to_string(), "Environment variable PORT='eighty' is invalid");
        assert_eq!(config.simulator.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_no_override() {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, |_| None).unwrap();
        assert_eq!(config.simulator.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let path = std::env::temp_dir().join(format!("status-poller-{}.toml", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[client]\nmax_total_ms = 0\n[simulator]\nsuccess_probability = -1.0").unwrap();
        drop(file);

        let err = load_config(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_read_config_skips_validation() {
        let path = std::env::temp_dir().join(format!("status-poller-raw-{}.toml", std::process::id()));
        fs::write(&path, "[client]\ninitial_interval_ms = 0\n").unwrap();

        let config = read_config(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.client.initial_interval_ms, 0);
        assert_eq!(config.simulator.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/status-poller.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
