//! Geometric backoff between status polls.

use std::time::Duration;

/// Backoff schedule for one polling session.
///
/// The first delay is the configured initial interval as-is; the cap is only
/// applied to intervals produced by multiplication.
#[derive(Debug, Clone)]
pub struct Backoff {
    current: Duration,
    cap: Duration,
    multiplier: f64,
}

impl Backoff {
    /// Create a schedule starting at `initial`.
    pub fn new(initial: Duration, cap: Duration, multiplier: f64) -> Self {
        Self {
            current: initial,
            cap,
            multiplier,
        }
    }

    /// Delay to wait before the next poll.
    pub fn current(&self) -> Duration {
        self.current
    }

    /// Grow the interval after a pending poll: `min(current * multiplier, cap)`.
    pub fn advance(&mut self) {
        self.current = scale(self.current, self.multiplier).min(self.cap);
    }
}

/// Multiply a duration by a float factor at nanosecond precision.
///
/// Non-finite, negative or overflowing products saturate to `Duration::MAX`
/// so the caller's cap takes over.
fn scale(delay: Duration, factor: f64) -> Duration {
    let nanos = (delay.as_nanos() as f64 * factor).round();
    if !nanos.is_finite() || nanos < 0.0 {
        return Duration::MAX;
    }
    if nanos >= u64::MAX as f64 {
        return Duration::MAX;
    }
    Duration::from_nanos(nanos as u64)
}
