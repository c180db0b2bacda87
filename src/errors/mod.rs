//! Domain-specific error types for dag-designer
//!
//! # Error Categories
//!
//! - **GraphError**: node kind resolution and node/edge lookups
//! - **ExportError**: export integrity checks, serialization and writing
//! - **ConfigError**: loading the designer configuration
//! - **SessionError**: dispatching recorded UI events
//!
//! Rejected connections are not errors: the store drops them and logs a
//! warning. See [`crate::graph::GraphStore::connect`].

pub mod config;
pub mod export;
pub mod graph;
pub mod session;

pub use config::ConfigError;
pub use export::{EdgeEndpoint, ExportError};
pub use graph::GraphError;
pub use session::SessionError;

/// Result type alias for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type alias for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for session dispatch
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_result_alias() {
        let result: GraphResult<()> = Err(GraphError::UnknownNodeKind("loopNode".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_export_result_alias() {
        let result: ExportResult<Vec<u8>> = Err(ExportError::DuplicateNodeId("1".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_result_alias() {
        let result: ConfigResult<()> = Err(ConfigError::Invalid("columns".to_string()));
        assert!(result.is_err());
    }
}
