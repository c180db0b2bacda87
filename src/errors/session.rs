//! Session error types
//!
//! A session error aborts the event that raised it. The session itself
//! stays usable, so callers keep dispatching subsequent events.

use thiserror::Error;

use super::{ExportError, GraphError};

/// Session dispatch errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// Event referenced an invalid graph entity
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Export event failed
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Event log could not be parsed
    #[error("Invalid event log: {0}")]
    InvalidEventLog(#[from] serde_yaml::Error),
}

impl SessionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::Graph(err) => err.error_code(),
            SessionError::Export(err) => err.error_code(),
            SessionError::InvalidEventLog(_) => "VALIDATION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_delegates() {
        let err = SessionError::from(GraphError::InvalidConnection {
            source_id: "3".to_string(),
            target_id: "9".to_string(),
        });
        assert_eq!(err.error_code(), "INVALID_CONNECTION");
        assert_eq!(err.to_string(), "Invalid connection 3 -> 9");
    }
}
