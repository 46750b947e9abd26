//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! SIGINT (Ctrl+C) ──┐
//!                   ├─→ CancellationToken::cancel
//! deadline elapsed ─┘       → StatusServer stops accepting, drains
//!                           → Poller returns Cancelled
//! ```

pub mod signals;

pub use signals::{cancel_after, cancel_on_ctrl_c};
