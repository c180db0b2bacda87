pub mod changes;
pub mod edge;
pub mod node;
pub mod position;
pub mod registry;
pub mod store;

pub use changes::*;
pub use edge::*;
pub use node::*;
pub use position::*;
pub use registry::*;
pub use store::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// Node kinds (matching the canvas node type names)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "defaultNode")]
    Default,
    #[serde(rename = "taskNode")]
    Task,
}

impl NodeKind {
    pub const ALL: [NodeKind; 2] = [NodeKind::Default, NodeKind::Task];

    /// Name used on the canvas and in exported documents
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Default => "defaultNode",
            NodeKind::Task => "taskNode",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "defaultNode" => Some(NodeKind::Default),
            "taskNode" => Some(NodeKind::Task),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_wire(kind.as_str()), Some(kind));
        }
        assert_eq!(NodeKind::from_wire("Task"), None);
    }

    #[test]
    fn test_serde_uses_wire_name() {
        let yaml = serde_yaml::to_string(&NodeKind::Task).unwrap();
        assert_eq!(yaml.trim(), "taskNode");
        let kind: NodeKind = serde_yaml::from_str("defaultNode").unwrap();
        assert_eq!(kind, NodeKind::Default);
    }
}
