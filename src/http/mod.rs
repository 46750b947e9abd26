//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout)
//!     → GET /status handler
//!     → simulator::OperationSimulator::query
//!     → {"result": "..."} JSON response
//! ```

pub mod server;

pub use server::StatusServer;
