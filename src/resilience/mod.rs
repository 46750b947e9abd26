//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Poll returns pending:
//!     → backoff.rs (delay before the next poll, grown geometrically up to a cap)
//!     → client::poller sleeps, racing cancellation
//! ```
//!
//! # Design Decisions
//! - No jitter: delays are exact so sessions are reproducible
//! - Only `pending` retries; transport and protocol failures never back off

pub mod backoff;

pub use backoff::Backoff;
