use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::edge::Edge;
use super::node::Node;
use super::position::Position;

/// Incremental update to a node, as emitted by the canvas
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeChange {
    Position {
        id: String,
        #[serde(default)]
        position: Option<Position>,
        #[serde(default)]
        dragging: Option<bool>,
    },
    Select {
        id: String,
        selected: bool,
    },
    Remove {
        id: String,
    },
}

impl NodeChange {
    pub fn id(&self) -> &str {
        match self {
            NodeChange::Position { id, .. }
            | NodeChange::Select { id, .. }
            | NodeChange::Remove { id } => id,
        }
    }
}

/// Incremental update to an edge, as emitted by the canvas
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EdgeChange {
    Select { id: String, selected: bool },
    Remove { id: String },
}

impl EdgeChange {
    pub fn id(&self) -> &str {
        match self {
            EdgeChange::Select { id, .. } | EdgeChange::Remove { id } => id,
        }
    }
}

/// Result of applying a single change
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeOutcome {
    Applied { id: String },
    Skipped { id: String, reason: String },
}

impl ChangeOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ChangeOutcome::Applied { .. })
    }

    fn skipped(id: &str, reason: String) -> Self {
        warn!("Skipping change for {}: {}", id, reason);
        ChangeOutcome::Skipped {
            id: id.to_string(),
            reason,
        }
    }
}

/// Fold node changes into `nodes` in order.
///
/// Every change carries absolute values, so applying the same change twice
/// leaves the same state. Removal keeps the relative order of the rest.
pub fn apply_node_changes(changes: &[NodeChange], nodes: &mut Vec<Node>) -> Vec<ChangeOutcome> {
    changes
        .iter()
        .map(|change| apply_node_change(change, nodes))
        .collect()
}

fn apply_node_change(change: &NodeChange, nodes: &mut Vec<Node>) -> ChangeOutcome {
    let id = change.id();

    match change {
        NodeChange::Remove { .. } => {
            let before = nodes.len();
            nodes.retain(|n| n.id != id);
            if nodes.len() == before {
                return ChangeOutcome::skipped(id, "node not found".to_string());
            }
            debug!("Removed node {}", id);
        }
        NodeChange::Position {
            position, dragging, ..
        } => {
            let Some(node) = nodes.iter_mut().find(|n| n.id == id) else {
                return ChangeOutcome::skipped(id, "node not found".to_string());
            };
            if let Some(position) = position {
                node.position = *position;
            }
            if let Some(dragging) = dragging {
                node.dragging = *dragging;
            }
            debug!("Moved node {} to {:?}", id, node.position);
        }
        NodeChange::Select { selected, .. } => {
            let Some(node) = nodes.iter_mut().find(|n| n.id == id) else {
                return ChangeOutcome::skipped(id, "node not found".to_string());
            };
            node.selected = *selected;
        }
    }

    ChangeOutcome::Applied { id: id.to_string() }
}

/// Fold edge changes into `edges` in order, with the same guarantees as
/// [`apply_node_changes`]
pub fn apply_edge_changes(changes: &[EdgeChange], edges: &mut Vec<Edge>) -> Vec<ChangeOutcome> {
    changes
        .iter()
        .map(|change| match change {
            EdgeChange::Select { id, selected } => {
                match edges.iter_mut().find(|e| &e.id == id) {
                    Some(edge) => {
                        edge.selected = *selected;
                        ChangeOutcome::Applied { id: id.clone() }
                    }
                    None => ChangeOutcome::skipped(id, "edge not found".to_string()),
                }
            }
            EdgeChange::Remove { id } => {
                let before = edges.len();
                edges.retain(|e| &e.id != id);
                if edges.len() == before {
                    ChangeOutcome::skipped(id, "edge not found".to_string())
                } else {
                    debug!("Removed edge {}", id);
                    ChangeOutcome::Applied { id: id.clone() }
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;

    fn sample_nodes() -> Vec<Node> {
        ["1", "2", "3"]
            .iter()
            .map(|id| Node::new(*id, NodeKind::Task, Position::default(), *id))
            .collect()
    }

    #[test]
    fn test_position_change_is_idempotent() {
        let mut nodes = sample_nodes();
        let change = NodeChange::Position {
            id: "2".to_string(),
            position: Some(Position::new(10.0, 20.0)),
            dragging: Some(true),
        };
        apply_node_changes(&[change.clone()], &mut nodes);
        let once = nodes.clone();
        apply_node_changes(&[change], &mut nodes);
        assert_eq!(nodes, once);
        assert_eq!(nodes[1].position, Position::new(10.0, 20.0));
        assert!(nodes[1].dragging);
        assert_eq!(nodes[0], sample_nodes()[0]);
    }

    #[test]
    fn test_position_without_coordinates_keeps_position() {
        let mut nodes = sample_nodes();
        nodes[0].position = Position::new(5.0, 5.0);
        let outcomes = apply_node_changes(
            &[NodeChange::Position {
                id: "1".to_string(),
                position: None,
                dragging: Some(false),
            }],
            &mut nodes,
        );
        assert!(outcomes[0].is_applied());
        assert_eq!(nodes[0].position, Position::new(5.0, 5.0));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut nodes = sample_nodes();
        let outcomes = apply_node_changes(
            &[
                NodeChange::Remove { id: "2".to_string() },
                NodeChange::Remove { id: "2".to_string() },
            ],
            &mut nodes,
        );
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(outcomes[0].is_applied());
        assert!(!outcomes[1].is_applied());
    }

    #[test]
    fn test_unknown_node_is_skipped() {
        let mut nodes = sample_nodes();
        let outcomes = apply_node_changes(
            &[NodeChange::Select {
                id: "9".to_string(),
                selected: true,
            }],
            &mut nodes,
        );
        assert_eq!(
            outcomes,
            vec![ChangeOutcome::Skipped {
                id: "9".to_string(),
                reason: "node not found".to_string(),
            }]
        );
        assert_eq!(nodes, sample_nodes());
    }

    #[test]
    fn test_edge_select_and_remove() {
        let mut edges = vec![Edge::new("e1-2", "1", "2"), Edge::new("e2-3", "2", "3")];
        let outcomes = apply_edge_changes(
            &[
                EdgeChange::Select {
                    id: "e2-3".to_string(),
                    selected: true,
                },
                EdgeChange::Remove {
                    id: "e1-2".to_string(),
                },
            ],
            &mut edges,
        );
        assert!(outcomes.iter().all(ChangeOutcome::is_applied));
        assert_eq!(edges.len(), 1);
        assert!(edges[0].selected);
    }

    #[test]
    fn test_edge_remove_is_idempotent() {
        let mut edges = vec![
            Edge::new("e1-2", "1", "2"),
            Edge::new("e2-3", "2", "3"),
            Edge::new("e3-1", "3", "1"),
        ];
        let outcomes = apply_edge_changes(
            &[
                EdgeChange::Remove {
                    id: "e2-3".to_string(),
                },
                EdgeChange::Remove {
                    id: "e2-3".to_string(),
                },
                EdgeChange::Remove {
                    id: "e9-9".to_string(),
                },
            ],
            &mut edges,
        );
        let ids: Vec<&str> = edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1-2", "e3-1"]);
        assert!(outcomes[0].is_applied());
        assert_eq!(
            outcomes[1],
            ChangeOutcome::Skipped {
                id: "e2-3".to_string(),
                reason: "edge not found".to_string(),
            }
        );
        assert!(!outcomes[2].is_applied());
    }

    #[test]
    fn test_change_wire_format() {
        let yaml = "type: position\nid: '4'\nposition:\n  x: 10\n  y: 20.5\n";
        let change: NodeChange = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            change,
            NodeChange::Position {
                id: "4".to_string(),
                position: Some(Position::new(10.0, 20.5)),
                dragging: None,
            }
        );
        let change: EdgeChange = serde_yaml::from_str("type: remove\nid: e1-2\n").unwrap();
        assert_eq!(change.id(), "e1-2");
    }
}
