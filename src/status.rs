//! Operation status values and their wire representation.
//!
//! # Wire Format
//! ```text
//! GET /status → 200 OK
//! {"result": "pending" | "completed" | "error"}
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// State of the single long-running operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    /// Still processing; the caller should ask again later.
    Pending,
    /// Finished successfully.
    Completed,
    /// Finished with a business-level failure.
    Error,
}

impl OperationStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationStatus::Pending => "pending",
            OperationStatus::Completed => "completed",
            OperationStatus::Error => "error",
        }
    }

    /// Returns true for `completed` and `error`.
    pub fn is_terminal(&self) -> bool {
        self.into_terminal().is_some()
    }

    /// Narrow to a terminal status, `None` while pending.
    pub fn into_terminal(self) -> Option<TerminalStatus> {
        match self {
            OperationStatus::Pending => None,
            OperationStatus::Completed => Some(TerminalStatus::Completed),
            OperationStatus::Error => Some(TerminalStatus::Error),
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A result string that is not one of the known statuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for OperationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OperationStatus::Pending),
            "completed" => Ok(OperationStatus::Completed),
            "error" => Ok(OperationStatus::Error),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Outcome that ends a polling session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalStatus {
    Completed,
    Error,
}

impl TerminalStatus {
    pub fn as_str(&self) -> &'static str {
        OperationStatus::from(*self).as_str()
    }
}

impl From<TerminalStatus> for OperationStatus {
    fn from(status: TerminalStatus) -> Self {
        match status {
            TerminalStatus::Completed => OperationStatus::Completed,
            TerminalStatus::Error => OperationStatus::Error,
        }
    }
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body served by `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBody {
    pub result: OperationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_statuses() {
        assert_eq!("pending".parse::<OperationStatus>(), Ok(OperationStatus::Pending));
        assert_eq!("completed".parse::<OperationStatus>(), Ok(OperationStatus::Completed));
        assert_eq!("error".parse::<OperationStatus>(), Ok(OperationStatus::Error));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let err = "Completed".parse::<OperationStatus>().unwrap_err();
        assert_eq!(err, UnknownStatus("Completed".to_string()));
        assert_eq!(err.to_string(), "unknown operation status 'Completed'");
    }

    #[test]
    fn test_terminal_narrowing() {
        assert!(!OperationStatus::Pending.is_terminal());
        assert_eq!(OperationStatus::Error.into_terminal(), Some(TerminalStatus::Error));
        assert_eq!(
            OperationStatus::from(TerminalStatus::Completed),
            OperationStatus::Completed
        );
    }

    #[test]
    fn test_body_serialization() {
        let body = StatusBody { result: OperationStatus::Pending };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"result":"pending"}"#);
    }
}
