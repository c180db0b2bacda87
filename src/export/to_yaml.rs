use crate::errors::ExportResult;

use super::document::WorkflowDocument;

/// Render the document as block-style YAML
pub fn render(document: &WorkflowDocument) -> ExportResult<String> {
    Ok(serde_yaml::to_string(document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::document::{EdgeRecord, NodeRecord, Workflow};
    use crate::graph::NodeKind;

    #[test]
    fn test_render_field_order() {
        let document = WorkflowDocument {
            workflow: Workflow {
                nodes: vec![NodeRecord {
                    id: "1".to_string(),
                    kind: NodeKind::Default,
                    label: "Source".to_string(),
                    meta: None,
                }],
                edges: vec![EdgeRecord {
                    id: "e1-1".to_string(),
                    from: "1".to_string(),
                    to: "1".to_string(),
                }],
            },
        };
        let yaml = render(&document).unwrap();

        let position = |needle: &str| yaml.find(needle).unwrap();
        assert!(yaml.starts_with("workflow:\n"));
        assert!(position("type: defaultNode") < position("label: Source"));
        assert!(position("label: Source") < position("meta: null"));
        assert!(position("id: e1-1") < position("from:"));
        assert!(position("from:") < position("to:"));
        assert!(!yaml.contains('{'));
    }
}
