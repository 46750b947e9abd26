//! Polling error definitions.

use std::time::Duration;
use thiserror::Error;

/// Boxed error from the transport layer.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that end a polling session.
///
/// Only a `pending` status is retried; every variant here is terminal for the
/// call that produced it.
#[derive(Debug, Error)]
pub enum PollError {
    /// The request could not be sent, the connection failed or timed out.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The server answered, but not with a recognised status.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The session exceeded its total time budget.
    #[error("timed out waiting for result after {elapsed:?} (limit {limit:?})")]
    Timeout { elapsed: Duration, limit: Duration },

    /// The caller cancelled the session.
    #[error("polling cancelled")]
    Cancelled,
}

impl PollError {
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        PollError::Transport(err.into())
    }

    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            PollError::Transport(_) => "transport",
            PollError::Protocol(_) => "protocol",
            PollError::Timeout { .. } => "timeout",
            PollError::Cancelled => "cancelled",
        }
    }
}

/// Malformed status responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("unexpected status code {0}")]
    UnexpectedStatus(u16),

    #[error("undecodable body: {0}")]
    Decode(String),

    #[error("unknown result '{0}'")]
    UnknownResult(String),
}

/// Failure to construct an HTTP probe.
#[derive(Debug, Error)]
pub enum ProbeSetupError {
    #[error("invalid base URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PollError::Timeout {
            elapsed: Duration::from_secs(4),
            limit: Duration::from_secs(3),
        };
        assert!(err.to_string().starts_with("timed out waiting for result"));

        let err: PollError = ProtocolError::UnexpectedStatus(503).into();
        assert_eq!(err.to_string(), "protocol error: unexpected status code 503");
        assert_eq!(err.kind(), "protocol");

        let err = PollError::transport("connection refused");
        assert_eq!(err.to_string(), "transport error: connection refused");
    }
}
