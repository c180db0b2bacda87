use serde::{Deserialize, Serialize};

use crate::config::CanvasConfig;

use super::position::Position;
use super::NodeKind;

// Workflow node as held by the graph store
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub position: Position,
    pub label: String,
    pub meta: Option<String>,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub dragging: bool,
}

impl Node {
    pub fn new(
        id: impl Into<String>,
        kind: NodeKind,
        position: Position,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            label: label.into(),
            meta: None,
            selected: false,
            dragging: false,
        }
    }

    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = Some(meta.into());
        self
    }
}

/// Build the node for the given counter value.
///
/// The id is the counter itself and the label embeds it, so both stay unique
/// as long as the caller never hands out the same counter twice.
pub fn create_node(kind: NodeKind, counter: u64, canvas: &CanvasConfig) -> Node {
    let id = counter.to_string();
    let label = format!("{}-{}", kind, id);
    Node::new(id, kind, grid_position(counter, canvas), label)
}

/// Grid slot for a counter value: columns advance first, rows wrap after
/// `columns * rows` nodes. A zero-sized grid collapses to a single slot.
pub fn grid_position(counter: u64, canvas: &CanvasConfig) -> Position {
    let columns = canvas.columns.max(1);
    let column = counter % columns;
    let row = (counter / columns) % canvas.rows.max(1);
    Position {
        x: canvas.origin_x + column as f64 * canvas.spacing,
        y: canvas.origin_y + row as f64 * canvas.spacing,
    }
}
