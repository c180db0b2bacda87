pub mod document;
pub mod sink;
pub mod to_yaml;

pub use document::{EdgeRecord, NodeRecord, Workflow, WorkflowDocument};
pub use sink::{DirectorySink, FileSink, MemorySink};

use std::path::PathBuf;
use tracing::info;

use crate::errors::ExportResult;
use crate::graph::{Edge, GraphStore, Node};

pub const DEFAULT_FILENAME: &str = "workflow.yaml";
pub const YAML_MIME_TYPE: &str = "text/yaml";

/// Bytes ready to be handed to a [`FileSink`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn yaml(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: YAML_MIME_TYPE.to_string(),
            bytes,
        }
    }
}

/// Serialize nodes and edges to the workflow YAML document
pub fn export(nodes: &[Node], edges: &[Edge]) -> ExportResult<Vec<u8>> {
    let document = WorkflowDocument::project(nodes, edges)?;
    Ok(to_yaml::render(&document)?.into_bytes())
}

pub fn export_store(store: &GraphStore) -> ExportResult<Vec<u8>> {
    export(store.nodes(), store.edges())
}

/// Export the store and hand the result to `sink` under `filename`.
/// Nothing reaches the sink if the export fails.
pub fn export_to(
    store: &GraphStore,
    filename: &str,
    sink: &dyn FileSink,
) -> ExportResult<PathBuf> {
    let bytes = export_store(store)?;
    let artifact = ExportArtifact::yaml(filename, bytes);
    let path = sink.save(&artifact)?;
    info!(
        "Exported {} node(s) and {} edge(s) to {}",
        store.nodes().len(),
        store.edges().len(),
        path.display()
    );
    Ok(path)
}
