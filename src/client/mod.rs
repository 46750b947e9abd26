//! Status polling client.
//!
//! # Data Flow
//! ```text
//! Poller::wait_for_result
//!     → probe.rs (one GET /status, decode)
//!     → poller.rs (classify: terminal / retry / fatal)
//!     → resilience::backoff (delay before the next probe)
//! ```
//!
//! # Design Decisions
//! - `pending` is the only retryable outcome
//! - `error` is a valid business result, returned as `Ok`
//! - Cancellation is a `CancellationToken` observed by the probe and the sleep

pub mod error;
pub mod poller;
pub mod probe;

pub use error::{PollError, ProbeSetupError, ProtocolError};
pub use poller::{PollStep, Poller, PollingConfig};
pub use probe::{HttpStatusProbe, StatusProbe};

use crate::config::PollerConfig;

/// Build an HTTP poller from configuration.
pub fn http_poller(config: &PollerConfig) -> Result<Poller<HttpStatusProbe>, ProbeSetupError> {
    let probe = HttpStatusProbe::from_config(config)?;
    Ok(Poller::new(probe, PollingConfig::from(config)))
}
