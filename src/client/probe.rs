//! Single status queries.
//!
//! # Responsibilities
//! - Issue exactly one `GET /status` per call
//! - Decode the body into an `OperationStatus`
//! - Classify failures as transport or protocol errors
//!
//! No retries happen here; the poller decides what to do next.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::client::error::{PollError, ProbeSetupError, ProtocolError};
use crate::config::PollerConfig;
use crate::status::OperationStatus;

/// Path of the status endpoint relative to the base URL.
pub const STATUS_PATH: &str = "/status";

/// One status query against the server.
pub trait StatusProbe: Send + Sync {
    /// Perform one request-response exchange.
    ///
    /// Returns `PollError::Cancelled` if `cancel` fires while in flight.
    fn probe(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<OperationStatus, PollError>> + Send;
}

/// Status probe over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStatusProbe {
    client: Client,
    status_url: Url,
}

impl HttpStatusProbe {
    /// Create a probe for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ProbeSetupError> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Self::with_client(base_url, client)
    }

    /// Create a probe on a preconfigured reqwest client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, ProbeSetupError> {
        Ok(Self {
            client,
            status_url: status_url(base_url)?,
        })
    }

    pub fn from_config(config: &PollerConfig) -> Result<Self, ProbeSetupError> {
        Self::new(&config.base_url, config.request_timeout())
    }

    pub fn status_url(&self) -> &Url {
        &self.status_url
    }

    async fn fetch(&self) -> Result<OperationStatus, PollError> {
        let response = self
            .client
            .get(self.status_url.clone())
            .send()
            .await
            .map_err(PollError::transport)?;

        let code = response.status();
        if code != StatusCode::OK {
            return Err(ProtocolError::UnexpectedStatus(code.as_u16()).into());
        }

        let body = response.bytes().await.map_err(PollError::transport)?;
        Ok(decode_status(&body)?)
    }
}

impl StatusProbe for HttpStatusProbe {
    async fn probe(&self, cancel: &CancellationToken) -> Result<OperationStatus, PollError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(PollError::Cancelled),
            result = self.fetch() => result,
        }
    }
}

/// Join the status path onto `base_url`, keeping any path prefix.
fn status_url(base_url: &str) -> Result<Url, ProbeSetupError> {
    let joined = format!("{}{}", base_url.trim_end_matches('/'), STATUS_PATH);
    Url::parse(&joined).map_err(|source| ProbeSetupError::InvalidUrl {
        url: base_url.to_string(),
        source,
    })
}

#[derive(Deserialize)]
struct RawStatusBody {
    result: String,
}

/// Decode a `{"result": "..."}` body.
pub fn decode_status(body: &[u8]) -> Result<OperationStatus, ProtocolError> {
    let raw: RawStatusBody =
        serde_json::from_slice(body).map_err(|e| ProtocolError::Decode(e.to_string()))?;
    raw.result
        .parse()
        .map_err(|_| ProtocolError::UnknownResult(raw.result))
}
