use indexmap::IndexMap;
use serde::Serialize;

use crate::errors::{GraphError, GraphResult};

use super::node::Node;
use super::NodeKind;

/// How the canvas draws a node of a given kind
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeStyle {
    pub background: &'static str,
    pub border: &'static str,
    pub label_color: Option<&'static str>,
    pub label_weight: Option<u16>,
    pub handle_color: &'static str,
    pub padding: u16,
    pub border_radius: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeKindEntry {
    /// Name shown in the node-kind selector
    pub display_name: &'static str,
    pub style: NodeStyle,
}

/// Registered node kinds, in selector order
#[derive(Clone, Debug)]
pub struct NodeKindRegistry {
    entries: IndexMap<NodeKind, NodeKindEntry>,
}

impl Default for NodeKindRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(
            NodeKind::Default,
            NodeKindEntry {
                display_name: "Default",
                style: NodeStyle {
                    background: "#fff",
                    border: "1px solid #ccc",
                    label_color: None,
                    label_weight: None,
                    handle_color: "#555",
                    padding: 8,
                    border_radius: 6,
                },
            },
        );
        registry.register(
            NodeKind::Task,
            NodeKindEntry {
                display_name: "Task",
                style: NodeStyle {
                    background: "#eef2ff",
                    border: "1px solid #c7d2fe",
                    label_color: Some("#3730a3"),
                    label_weight: Some(600),
                    handle_color: "#555",
                    padding: 8,
                    border_radius: 6,
                },
            },
        );
        registry
    }
}

impl NodeKindRegistry {
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Register or replace the entry for `kind`. A replaced entry keeps
    /// its selector position.
    pub fn register(&mut self, kind: NodeKind, entry: NodeKindEntry) {
        self.entries.insert(kind, entry);
    }

    pub fn get(&self, kind: NodeKind) -> Option<&NodeKindEntry> {
        self.entries.get(&kind)
    }

    pub fn is_registered(&self, kind: NodeKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Resolve a wire name such as `taskNode` to a registered kind
    pub fn resolve(&self, name: &str) -> GraphResult<NodeKind> {
        NodeKind::from_wire(name)
            .filter(|kind| self.is_registered(*kind))
            .ok_or_else(|| GraphError::UnknownNodeKind(name.to_string()))
    }

    pub fn kinds(&self) -> impl Iterator<Item = (NodeKind, &NodeKindEntry)> {
        self.entries.iter().map(|(kind, entry)| (*kind, entry))
    }

    pub fn style_for(&self, node: &Node) -> Option<&NodeStyle> {
        self.get(node.kind).map(|entry| &entry.style)
    }
}
