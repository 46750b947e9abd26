//! Server-side operation simulator.
//!
//! # Data Flow
//! ```text
//! GET /status (http::server)
//!     → state.rs (elapsed since cycle start vs processing delay)
//!     → pending, or a random terminal outcome that resets the cycle
//! ```

pub mod state;

pub use state::{OperationSimulator, OperationSnapshot, OperationState};
