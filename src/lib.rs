//! Status polling client and operation simulator.
//!
//! A client polls `GET /status` with geometric backoff until the operation
//! reports `completed` or `error`, a total deadline passes, or the caller
//! cancels. The server side simulates one long-running operation whose status
//! is a function of elapsed time plus a random terminal outcome.

// Core
pub mod client;
pub mod simulator;
pub mod status;

// Serving
pub mod http;

// Cross-cutting concerns
pub mod clock;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use client::{http_poller, PollError, Poller, PollingConfig};
pub use config::AppConfig;
pub use http::StatusServer;
pub use simulator::OperationSimulator;
pub use status::{OperationStatus, TerminalStatus};
