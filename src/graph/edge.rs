use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::node::Node;

// Arrow drawn at the target end of an edge
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum MarkerKind {
    #[serde(rename = "arrow")]
    Arrow,
}

// Directed edge between two nodes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub animated: bool,
    pub marker_end: Option<MarkerKind>,
    #[serde(default)]
    pub selected: bool,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            animated: false,
            marker_end: Some(MarkerKind::Arrow),
            selected: false,
        }
    }

    pub fn animated(mut self) -> Self {
        self.animated = true;
        self
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Connection gesture completed on the canvas, not yet validated
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingConnection {
    pub source: String,
    pub target: String,
}

impl PendingConnection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Turn a pending connection into an edge.
///
/// Returns `None` if either endpoint is not among `nodes`. Self-loops and
/// parallel edges are accepted; `issued` holds every edge id handed out so
/// far and the new id is chosen to avoid all of them.
pub fn connect_nodes(
    pending: &PendingConnection,
    nodes: &[Node],
    issued: &HashSet<String>,
) -> Option<Edge> {
    let has_node = |id: &str| nodes.iter().any(|n| n.id == id);
    if !has_node(&pending.source) || !has_node(&pending.target) {
        return None;
    }

    let id = next_edge_id(&pending.source, &pending.target, issued);
    Some(Edge::new(id, pending.source.clone(), pending.target.clone()).animated())
}

/// `e{source}-{target}`, or the first free `e{source}-{target}-{n}` when
/// that id has already been issued
pub fn next_edge_id(source: &str, target: &str, issued: &HashSet<String>) -> String {
    let base = format!("e{}-{}", source, target);
    if !issued.contains(&base) {
        return base;
    }
    let mut ordinal = 1u64;
    loop {
        let candidate = format!("{}-{}", base, ordinal);
        if !issued.contains(&candidate) {
            return candidate;
        }
        ordinal += 1;
    }
}
