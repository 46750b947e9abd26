//! Polling loop with backoff, total deadline and cancellation.
//!
//! # Session
//! ```text
//! start
//!   → deadline check (elapsed > max_total → Timeout)
//!   → probe
//!       Terminal(status) → return status
//!       Fatal(error)     → return error, no retry
//!       Retry            → cancelled? → sleep(backoff) racing cancel → grow backoff → loop
//! ```
//!
//! The deadline is checked before each probe, never during a sleep, so a
//! session can overrun `max_total` by at most one backoff interval plus one
//! probe.

use std::time::Duration;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

use crate::client::error::PollError;
use crate::client::probe::StatusProbe;
use crate::config::PollerConfig;
use crate::observability::metrics;
use crate::resilience::Backoff;
use crate::status::{OperationStatus, TerminalStatus};

/// Timing parameters for one polling session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollingConfig {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub max_total_duration: Duration,
    pub backoff_multiplier: f64,
}

impl From<&PollerConfig> for PollingConfig {
    fn from(config: &PollerConfig) -> Self {
        Self {
            initial_interval: config.initial_interval(),
            max_interval: config.max_interval(),
            max_total_duration: config.max_total_duration(),
            backoff_multiplier: config.backoff_multiplier,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self::from(&PollerConfig::default())
    }
}

/// What the loop does with one probe result.
#[derive(Debug)]
pub enum PollStep {
    /// Stop and hand the status to the caller.
    Terminal(TerminalStatus),
    /// Operation still pending; back off and poll again.
    Retry,
    /// Stop and hand the error to the caller.
    Fatal(PollError),
}

impl From<Result<OperationStatus, PollError>> for PollStep {
    fn from(result: Result<OperationStatus, PollError>) -> Self {
        match result {
            Ok(status) => match status.into_terminal() {
                Some(terminal) => PollStep::Terminal(terminal),
                None => PollStep::Retry,
            },
            Err(e) => PollStep::Fatal(e),
        }
    }
}

/// Drives a `StatusProbe` until the operation reaches a terminal status.
#[derive(Debug, Clone)]
pub struct Poller<P> {
    probe: P,
    config: PollingConfig,
}

impl<P: StatusProbe> Poller<P> {
    pub fn new(probe: P, config: PollingConfig) -> Self {
        Self { probe, config }
    }

    pub fn config(&self) -> &PollingConfig {
        &self.config
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Poll until `completed` or `error`, the total deadline, or cancellation.
    ///
    /// An `error` status is a successful result of the loop. Transport and
    /// protocol failures end the session immediately.
    pub async fn wait_for_result(
        &self,
        cancel: &CancellationToken,
    ) -> Result<TerminalStatus, PollError> {
        let start = Instant::now();
        let result = self.run_session(start, cancel).await;

        match &result {
            Ok(status) => {
                tracing::info!(result = %status, elapsed = ?start.elapsed(), "Operation reached terminal status");
                metrics::record_session(status.as_str(), start);
            }
            Err(e) => {
                tracing::warn!(error = %e, elapsed = ?start.elapsed(), "Polling session failed");
                metrics::record_session(e.kind(), start);
            }
        }
        result
    }

    async fn run_session(
        &self,
        start: Instant,
        cancel: &CancellationToken,
    ) -> Result<TerminalStatus, PollError> {
        let mut backoff = Backoff::new(
            self.config.initial_interval,
            self.config.max_interval,
            self.config.backoff_multiplier,
        );
        let mut attempt: u32 = 0;

        loop {
            let elapsed = start.elapsed();
            if elapsed > self.config.max_total_duration {
                return Err(PollError::Timeout {
                    elapsed,
                    limit: self.config.max_total_duration,
                });
            }

            attempt += 1;
            let result = self.probe.probe(cancel).await;
            metrics::record_probe(match &result {
                Ok(status) => status.as_str(),
                Err(e) => e.kind(),
            });

            match PollStep::from(result) {
                PollStep::Terminal(status) => return Ok(status),
                PollStep::Fatal(e) => return Err(e),
                PollStep::Retry => {}
            }

            if cancel.is_cancelled() {
                return Err(PollError::Cancelled);
            }

            let delay = backoff.current();
            tracing::debug!(attempt, delay = ?delay, "Operation pending, backing off");

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(PollError::Cancelled),
                _ = sleep(delay) => {}
            }

            backoff.advance();
        }
    }
}
