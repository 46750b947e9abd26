//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), optional
//!     → loader.rs (parse & deserialize, apply PORT override)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → client::Poller / http::StatusServer
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The polling loop trusts its config; validation happens here

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, read_config, ConfigError};
pub use schema::{AppConfig, ObservabilityConfig, PollerConfig, SimulatorConfig};
pub use validation::ValidationError;
