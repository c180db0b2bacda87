//! Graph-related error types
//!
//! Errors raised while resolving node kinds or connecting nodes in the
//! graph store.
//!
//! # Examples
//!
//! ```rust
//! use dag_designer::errors::GraphError;
//!
//! let err = GraphError::UnknownNodeKind("loopNode".to_string());
//! assert_eq!(err.error_code(), "VALIDATION_FAILED");
//! ```

use thiserror::Error;

/// Graph-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Node kind name is not in the registry
    #[error("Unknown node kind: {0}")]
    UnknownNodeKind(String),

    /// Connection attempt referenced a node that does not exist
    #[error("Invalid connection {source_id} -> {target_id}")]
    InvalidConnection {
        /// Source node identifier
        source_id: String,
        /// Target node identifier
        target_id: String,
    },
}

impl GraphError {
    /// Get error code for reporting
    pub fn error_code(&self) -> &'static str {
        match self {
            GraphError::UnknownNodeKind(_) => "VALIDATION_FAILED",
            GraphError::InvalidConnection { .. } => "INVALID_CONNECTION",
        }
    }
}
