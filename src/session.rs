use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::DesignerConfig;
use crate::errors::SessionResult;
use crate::export::{self, FileSink};
use crate::graph::{
    ChangeOutcome, Edge, EdgeChange, GraphStore, Node, NodeChange, NodeKind, NodeKindRegistry,
};

/// Discrete UI event consumed by the designer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Node-kind selector changed
    SelectKind { kind: String },
    /// "Add node" clicked; uses the selected kind unless one is given
    AddNode {
        #[serde(default)]
        kind: Option<String>,
    },
    /// Drag-connect gesture completed
    Connect { source: String, target: String },
    NodeChanges { changes: Vec<NodeChange> },
    EdgeChanges { changes: Vec<EdgeChange> },
    /// "Export" clicked
    Export,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EventOutcome {
    KindSelected(NodeKind),
    NodeAdded(Node),
    /// `None` when the connection was dropped
    Connected(Option<Edge>),
    ChangesApplied(Vec<ChangeOutcome>),
    Exported(PathBuf),
}

/// Parse a recorded event log (a YAML sequence of events)
pub fn parse_events(content: &str) -> SessionResult<Vec<SessionEvent>> {
    Ok(serde_yaml::from_str(content)?)
}

/// One designer session: a graph store plus the toolbar state, alive from
/// construction until dropped
#[derive(Debug)]
pub struct Session {
    store: GraphStore,
    registry: NodeKindRegistry,
    selected_kind: NodeKind,
    export_filename: String,
}

impl Session {
    pub fn new(config: &DesignerConfig) -> Self {
        let store = if config.session.start_with_sample {
            GraphStore::with_sample(config.canvas.clone())
        } else {
            GraphStore::new(config.canvas.clone())
        };
        Self::with_store(store, config)
    }

    pub fn with_store(store: GraphStore, config: &DesignerConfig) -> Self {
        Self {
            store,
            registry: NodeKindRegistry::default(),
            selected_kind: NodeKind::Default,
            export_filename: config.export.filename.clone(),
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn registry(&self) -> &NodeKindRegistry {
        &self.registry
    }

    pub fn selected_kind(&self) -> NodeKind {
        self.selected_kind
    }

    /// Handle one event. Errors abort only this event; the session stays
    /// usable for the next one.
    pub fn dispatch(
        &mut self,
        event: &SessionEvent,
        sink: &dyn FileSink,
    ) -> SessionResult<EventOutcome> {
        debug!("Dispatching {:?}", event);
        let outcome = match event {
            SessionEvent::SelectKind { kind } => {
                self.selected_kind = self.registry.resolve(kind)?;
                EventOutcome::KindSelected(self.selected_kind)
            }
            SessionEvent::AddNode { kind } => {
                let kind = match kind {
                    Some(name) => self.registry.resolve(name)?,
                    None => self.selected_kind,
                };
                EventOutcome::NodeAdded(self.store.add_node(kind))
            }
            SessionEvent::Connect { source, target } => {
                EventOutcome::Connected(self.store.connect(source, target))
            }
            SessionEvent::NodeChanges { changes } => {
                EventOutcome::ChangesApplied(self.store.apply_node_changes(changes))
            }
            SessionEvent::EdgeChanges { changes } => {
                EventOutcome::ChangesApplied(self.store.apply_edge_changes(changes))
            }
            SessionEvent::Export => {
                let path = export::export_to(&self.store, &self.export_filename, sink)?;
                EventOutcome::Exported(path)
            }
        };
        Ok(outcome)
    }

    /// Dispatch every event in order, collecting each result
    pub fn replay(
        &mut self,
        events: &[SessionEvent],
        sink: &dyn FileSink,
    ) -> Vec<SessionResult<EventOutcome>> {
        let results: Vec<_> = events.iter().map(|e| self.dispatch(e, sink)).collect();
        info!(
            "Replayed {} event(s), {} failed",
            results.len(),
            results.iter().filter(|r| r.is_err()).count()
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{GraphError, SessionError};
    use crate::export::MemorySink;
    use crate::graph::Position;

    fn session() -> Session {
        Session::new(&DesignerConfig::default())
    }

    #[test]
    fn test_add_node_uses_selected_kind() {
        let mut session = session();
        let sink = MemorySink::new();
        session
            .dispatch(
                &SessionEvent::SelectKind {
                    kind: "taskNode".to_string(),
                },
                &sink,
            )
            .unwrap();
        let outcome = session
            .dispatch(&SessionEvent::AddNode { kind: None }, &sink)
            .unwrap();
        match outcome {
            EventOutcome::NodeAdded(node) => {
                assert_eq!(node.kind, NodeKind::Task);
                assert_eq!(node.label, "taskNode-4");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_keeps_selection() {
        let mut session = session();
        let sink = MemorySink::new();
        let err = session
            .dispatch(
                &SessionEvent::SelectKind {
                    kind: "mergeNode".to_string(),
                },
                &sink,
            )
            .unwrap_err();
        assert!(matches!(err, SessionError::Graph(GraphError::UnknownNodeKind(_))));
        assert_eq!(session.selected_kind(), NodeKind::Default);
    }

    #[test]
    fn test_dropped_connection_is_not_an_error() {
        let mut session = session();
        let sink = MemorySink::new();
        let outcome = session
            .dispatch(
                &SessionEvent::Connect {
                    source: "1".to_string(),
                    target: "42".to_string(),
                },
                &sink,
            )
            .unwrap();
        assert_eq!(outcome, EventOutcome::Connected(None));
        assert_eq!(session.store().edges().len(), 2);
    }

    #[test]
    fn test_export_event_writes_to_sink() {
        let mut session = session();
        let sink = MemorySink::new();
        let outcome = session.dispatch(&SessionEvent::Export, &sink).unwrap();
        assert_eq!(outcome, EventOutcome::Exported(PathBuf::from("workflow.yaml")));
        assert_eq!(sink.artifacts().len(), 1);
    }

    #[test]
    fn test_parse_event_log() {
        let events = parse_events(
            r#"
- event: select_kind
  kind: taskNode
- event: add_node
- event: connect
  source: "3"
  target: "4"
- event: node_changes
  changes:
    - type: position
      id: "4"
      position: { x: 10, y: 20 }
- event: edge_changes
  changes:
    - type: select
      id: e3-4
      selected: true
- event: export
"#,
        )
        .unwrap();
        assert_eq!(events.len(), 6);
        assert_eq!(events[1], SessionEvent::AddNode { kind: None });
        assert_eq!(events[5], SessionEvent::Export);

        let mut session = session();
        let sink = MemorySink::new();
        let results = session.replay(&events, &sink);
        assert!(results.iter().all(|r| r.is_ok()));
        let node = session.store().node("4").unwrap();
        assert_eq!(node.position, Position::new(10.0, 20.0));
        assert!(session.store().edge("e3-4").unwrap().selected);
        assert_eq!(sink.artifacts().len(), 1);
    }

    #[test]
    fn test_parse_invalid_event_log() {
        let err = parse_events("- event: teleport\n").unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
    }
}
