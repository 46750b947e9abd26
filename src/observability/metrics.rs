//! Metrics collection and exposition.
//!
//! # Metrics
//! - `status_poller_probes_total` (counter): status queries by outcome
//! - `status_poller_sessions_total` (counter): polling sessions by result
//! - `status_poller_session_duration_seconds` (histogram): session latency
//! - `status_simulator_responses_total` (counter): responses served by result
//!
//! Without an installed recorder every call is a no-op.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tokio::time::Instant;

use crate::status::OperationStatus;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one probe; `outcome` is a status name or an error kind.
pub fn record_probe(outcome: &'static str) {
    counter!("status_poller_probes_total", "outcome" => outcome).increment(1);
}

/// Record the end of a polling session.
pub fn record_session(result: &'static str, start: Instant) {
    counter!("status_poller_sessions_total", "result" => result).increment(1);
    histogram!("status_poller_session_duration_seconds", "result" => result)
        .record(start.elapsed().as_secs_f64());
}

/// Record a response produced by the simulator.
pub fn record_status_response(status: OperationStatus) {
    counter!("status_simulator_responses_total", "result" => status.as_str()).increment(1);
}
