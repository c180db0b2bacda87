use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::{EdgeEndpoint, ExportError, ExportResult};
use crate::graph::{Edge, Node, NodeKind};

/// Exported document: `{ workflow: { nodes, edges } }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    pub workflow: Workflow,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

// Field order is part of the file format
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
    pub meta: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: String,
    pub from: String,
    pub to: String,
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            kind: node.kind,
            label: node.label.clone(),
            meta: node.meta.clone(),
        }
    }
}

impl From<&Edge> for EdgeRecord {
    fn from(edge: &Edge) -> Self {
        Self {
            id: edge.id.clone(),
            from: edge.source.clone(),
            to: edge.target.clone(),
        }
    }
}

impl WorkflowDocument {
    /// Project nodes and edges into a document, keeping their order.
    ///
    /// Fails on the first duplicate node id or dangling edge endpoint.
    pub fn project(nodes: &[Node], edges: &[Edge]) -> ExportResult<Self> {
        let mut node_ids = HashSet::with_capacity(nodes.len());
        for node in nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(ExportError::DuplicateNodeId(node.id.clone()));
            }
        }

        for edge in edges {
            let endpoints = [
                (EdgeEndpoint::From, &edge.source),
                (EdgeEndpoint::To, &edge.target),
            ];
            for (endpoint, node_id) in endpoints {
                if !node_ids.contains(node_id.as_str()) {
                    return Err(ExportError::DanglingEdge {
                        edge_id: edge.id.clone(),
                        endpoint,
                        node_id: node_id.clone(),
                    });
                }
            }
        }

        Ok(Self {
            workflow: Workflow {
                nodes: nodes.iter().map(NodeRecord::from).collect(),
                edges: edges.iter().map(EdgeRecord::from).collect(),
            },
        })
    }
}
