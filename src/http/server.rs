//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router exposing `GET /status`
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve on a listener until the shutdown token fires

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::clock::{Clock, TokioClock};
use crate::config::SimulatorConfig;
use crate::simulator::OperationSimulator;
use crate::status::StatusBody;

/// HTTP server answering status queries from one simulated operation.
pub struct StatusServer<C = TokioClock> {
    simulator: Arc<OperationSimulator<C>>,
    request_timeout: Duration,
}

impl StatusServer<TokioClock> {
    /// Create a server with a fresh simulator from configuration.
    pub fn new(config: &SimulatorConfig) -> Self {
        Self::with_simulator(
            Arc::new(OperationSimulator::from_config(config)),
            Duration::from_secs(config.request_timeout_secs),
        )
    }
}

impl<C: Clock> StatusServer<C> {
    pub fn with_simulator(simulator: Arc<OperationSimulator<C>>, request_timeout: Duration) -> Self {
        Self {
            simulator,
            request_timeout,
        }
    }

    pub fn simulator(&self) -> &Arc<OperationSimulator<C>> {
        &self.simulator
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn router(&self) -> Router {
        Router::new()
            .route("/status", get(status_handler::<C>))
            .with_state(self.simulator.clone())
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(self.request_timeout))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Serve on `listener` until `shutdown` is cancelled.
    pub async fn run(self, listener: TcpListener, shutdown: CancellationToken) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            processing_ms = self.simulator.processing_duration().as_millis() as u64,
            "Status server starting"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown.cancelled_owned())
            .await?;

        tracing::info!("Status server stopped");
        Ok(())
    }
}

/// `GET /status`: current state of the simulated operation.
async fn status_handler<C: Clock>(
    State(simulator): State<Arc<OperationSimulator<C>>>,
) -> Json<StatusBody> {
    let result = simulator.query();
    tracing::debug!(result = %result, "Status queried");
    Json(StatusBody { result })
}
