use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::config::CanvasConfig;
use crate::errors::{GraphError, GraphResult};

use super::changes::{self, ChangeOutcome, EdgeChange, NodeChange};
use super::edge::{connect_nodes, Edge, PendingConnection};
use super::node::{create_node, Node};
use super::position::Position;
use super::NodeKind;

/// In-memory nodes and edges for one designer session.
///
/// Ids come from a counter that only moves forward, and every edge id ever
/// issued is remembered, so removed ids are never handed out again.
#[derive(Clone, Debug, Serialize)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_id: u64,
    #[serde(skip)]
    issued_edge_ids: HashSet<String>,
    #[serde(skip)]
    canvas: CanvasConfig,
}

impl GraphStore {
    pub fn new(canvas: CanvasConfig) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            next_id: 1,
            issued_edge_ids: HashSet::new(),
            canvas,
        }
    }

    /// Store seeded with the `Source -> Preprocess -> Train` sample graph
    pub fn with_sample(canvas: CanvasConfig) -> Self {
        let nodes = vec![
            Node::new("1", NodeKind::Default, Position::new(250.0, 5.0), "Source"),
            Node::new("2", NodeKind::Task, Position::new(100.0, 100.0), "Preprocess"),
            Node::new("3", NodeKind::Task, Position::new(400.0, 150.0), "Train"),
        ];
        let edges = vec![
            Edge::new("e1-2", "1", "2").animated(),
            Edge::new("e2-3", "2", "3"),
        ];
        let issued_edge_ids = edges.iter().map(|e| e.id.clone()).collect();

        Self {
            nodes,
            edges,
            next_id: 4,
            issued_edge_ids,
            canvas,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Append a node of `kind` placed on the next grid slot
    pub fn add_node(&mut self, kind: NodeKind) -> Node {
        let node = create_node(kind, self.next_id, &self.canvas);
        self.next_id += 1;
        debug!("Added node {} ({}) at {:?}", node.id, node.kind, node.position);
        self.nodes.push(node.clone());
        node
    }

    /// Connect two nodes.
    ///
    /// An unknown endpoint drops the connection: nothing is added and a
    /// warning is logged.
    pub fn connect(&mut self, source: &str, target: &str) -> Option<Edge> {
        match self.try_connect(source, target) {
            Ok(edge) => Some(edge),
            Err(err) => {
                warn!("Ignoring connection: {}", err);
                None
            }
        }
    }

    /// Connect two nodes, failing with [`GraphError::InvalidConnection`]
    /// when either endpoint is missing. Edges are unchanged on failure.
    pub fn try_connect(&mut self, source: &str, target: &str) -> GraphResult<Edge> {
        let pending = PendingConnection::new(source, target);
        let edge = connect_nodes(&pending, &self.nodes, &self.issued_edge_ids).ok_or_else(|| {
            GraphError::InvalidConnection {
                source_id: source.to_string(),
                target_id: target.to_string(),
            }
        })?;

        debug!("Connected {} -> {} as {}", edge.source, edge.target, edge.id);
        self.issued_edge_ids.insert(edge.id.clone());
        self.edges.push(edge.clone());
        Ok(edge)
    }

    /// Apply canvas node changes. Edges attached to a removed node are
    /// removed with it.
    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) -> Vec<ChangeOutcome> {
        let outcomes = changes::apply_node_changes(changes, &mut self.nodes);

        let removed_any = changes.iter().zip(&outcomes).any(|(change, outcome)| {
            matches!(change, NodeChange::Remove { .. }) && outcome.is_applied()
        });
        if removed_any {
            let node_ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
            let before = self.edges.len();
            self.edges.retain(|e| {
                node_ids.contains(e.source.as_str()) && node_ids.contains(e.target.as_str())
            });
            let dropped = before - self.edges.len();
            if dropped > 0 {
                debug!("Removed {} edge(s) attached to removed nodes", dropped);
            }
        }

        outcomes
    }

    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) -> Vec<ChangeOutcome> {
        changes::apply_edge_changes(changes, &mut self.edges)
    }
}
