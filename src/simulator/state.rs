//! Simulated long-running operation.
//!
//! # State Transitions
//! ```text
//! PENDING --(elapsed >= processing_duration)--> COMPLETED | ERROR
//! COMPLETED | ERROR --(same query)--> timer reset, next cycle starts PENDING
//! ```
//!
//! The terminal outcome is drawn with `success_probability` for `completed`.
//! Reading the elapsed time, drawing the outcome and resetting the timer happen
//! under one lock, so concurrent queries observe a single terminal response
//! per cycle.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

use crate::clock::{Clock, TokioClock};
use crate::config::SimulatorConfig;
use crate::observability::metrics;
use crate::status::OperationStatus;

/// Timer of the operation currently in flight.
#[derive(Debug, Clone, Copy)]
pub struct OperationState {
    /// When the current cycle began.
    pub started_at: Instant,
    /// Number of terminal responses emitted so far.
    pub completed_cycles: u64,
}

/// Point-in-time view of the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSnapshot {
    pub elapsed: Duration,
    pub completed_cycles: u64,
}

struct Inner {
    state: OperationState,
    rng: StdRng,
}

/// One long-running operation that answers status queries.
pub struct OperationSimulator<C = TokioClock> {
    clock: C,
    processing_duration: Duration,
    success_probability: f64,
    inner: Mutex<Inner>,
}

impl OperationSimulator<TokioClock> {
    /// Build a simulator on tokio's clock from configuration.
    pub fn from_config(config: &SimulatorConfig) -> Self {
        Self::with_clock(
            TokioClock,
            config.processing_delay(),
            config.success_probability,
            config.seed,
        )
    }
}

impl<C: Clock> OperationSimulator<C> {
    /// Build a simulator on an explicit clock.
    ///
    /// `seed` fixes the outcome sequence; `None` seeds from OS entropy.
    pub fn with_clock(
        clock: C,
        processing_duration: Duration,
        success_probability: f64,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let started_at = clock.now();

        Self {
            clock,
            processing_duration,
            success_probability: success_probability.clamp(0.0, 1.0),
            inner: Mutex::new(Inner {
                state: OperationState {
                    started_at,
                    completed_cycles: 0,
                },
                rng,
            }),
        }
    }

    /// Answer one status query.
    pub fn query(&self) -> OperationStatus {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();
        let elapsed = now.saturating_duration_since(inner.state.started_at);

        let status = if elapsed < self.processing_duration {
            OperationStatus::Pending
        } else {
            let status = if inner.rng.gen_bool(self.success_probability) {
                OperationStatus::Completed
            } else {
                OperationStatus::Error
            };
            inner.state.started_at = now;
            inner.state.completed_cycles += 1;
            tracing::info!(
                result = %status,
                elapsed_ms = elapsed.as_millis() as u64,
                cycle = inner.state.completed_cycles,
                "Operation finished, starting next cycle"
            );
            status
        };

        metrics::record_status_response(status);
        status
    }

    /// Current elapsed time and cycle count, without side effects.
    pub fn snapshot(&self) -> OperationSnapshot {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        OperationSnapshot {
            elapsed: self
                .clock
                .now()
                .saturating_duration_since(inner.state.started_at),
            completed_cycles: inner.state.completed_cycles,
        }
    }

    pub fn processing_duration(&self) -> Duration {
        self.processing_duration
    }
}

impl<C> std::fmt::Debug for OperationSimulator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationSimulator")
            .field("processing_duration", &self.processing_duration)
            .field("success_probability", &self.success_probability)
            .finish()
    }
}
