//! Export error types
//!
//! Export fails fast when the document would carry a dangling reference, so
//! a partial or inconsistent `workflow.yaml` is never produced.
//!
//! # Examples
//!
//! ```rust
//! use dag_designer::errors::{EdgeEndpoint, ExportError};
//!
//! let err = ExportError::DanglingEdge {
//!     edge_id: "e1-9".to_string(),
//!     endpoint: EdgeEndpoint::To,
//!     node_id: "9".to_string(),
//! };
//! assert!(err.is_integrity_error());
//! ```

use std::fmt;

use thiserror::Error;

/// Which end of an edge a dangling reference sits on
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EdgeEndpoint {
    From,
    To,
}

impl fmt::Display for EdgeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeEndpoint::From => write!(f, "from"),
            EdgeEndpoint::To => write!(f, "to"),
        }
    }
}

/// Export operation errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// Edge references a node id that is not part of the document
    #[error("Edge id:[{edge_id}] {endpoint} {node_id:?} not found in nodes")]
    DanglingEdge {
        edge_id: String,
        endpoint: EdgeEndpoint,
        node_id: String,
    },

    /// Two nodes share an id
    #[error("Duplicate node id {0:?}")]
    DuplicateNodeId(String),

    /// YAML serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// Writing the artifact failed
    #[error("Failed to write {filename}: {source}")]
    Write {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Check if the document model itself was inconsistent
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            ExportError::DanglingEdge { .. } | ExportError::DuplicateNodeId(_)
        )
    }

    /// Get error code for reporting
    pub fn error_code(&self) -> &'static str {
        match self {
            ExportError::DanglingEdge { .. } | ExportError::DuplicateNodeId(_) => {
                "INTEGRITY_FAILED"
            }
            ExportError::Serialization(_) => "SERIALIZATION_FAILED",
            ExportError::Write { .. } => "OPERATION_FAILED",
        }
    }
}
