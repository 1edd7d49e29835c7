//! Variant dispatch: which fields (or actions) the panel shows for an element.
//!
//! | Element | Panel |
//! |---------|-------|
//! | Scheme node | `type` and `argumentationScheme` selects |
//! | Atomic node | `text` and `reference.text` multi-line text |
//! | Edge | read-only, nothing to edit |
//! | No selection | reset / export / render actions |
//!
//! Fields carry their current value from the draft. A select's "Unknown"
//! option has no value (`None`); choosing it clears the attribute.

use crate::actions::{ActionGroup, action_menu};
use crate::config::InspectorConfig;
use ab_core::{EdgeElement, GraphElement, GraphMeta, PropertyPath, Scheme, SchemeType};
use serde::Serialize;

/// Label of the select option that clears the value.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Rows a multi-line text field shows at minimum.
const TEXT_MIN_ROWS: u8 = 3;

const DARK_MODE_NOTE: &str = "The rendering respects the dark mode. \
     If you want a white background, please switch to the light mode.";

/// What the inspector shows for the current element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "panel", rename_all = "camelCase")]
pub enum Panel {
    Fields {
        fields: Vec<Field>,
    },
    ReadOnly {
        edge: EdgeElement,
    },
    Actions {
        graph: GraphMeta,
        groups: Vec<ActionGroup>,
        note: Option<&'static str>,
    },
}

impl Panel {
    pub fn fields(&self) -> &[Field] {
        match self {
            Panel::Fields { fields } => fields.as_slice(),
            Panel::ReadOnly { .. } | Panel::Actions { .. } => &[],
        }
    }

    pub fn field(&self, path: &PropertyPath) -> Option<&Field> {
        self.fields().iter().find(|f| &f.path == path)
    }
}

/// One editable attribute bound to a draft path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub path: PropertyPath,
    pub label: &'static str,
    pub widget: Widget,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Widget {
    Select {
        value: Option<&'static str>,
        options: Vec<SelectOption>,
    },
    #[serde(rename_all = "camelCase")]
    Multiline { value: String, min_rows: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// `None` for the "Unknown" option.
    pub value: Option<&'static str>,
    pub label: &'static str,
}

/// Map an element to its panel. Total over all variants.
pub fn panel_for(element: &GraphElement, config: &InspectorConfig) -> Panel {
    match element {
        GraphElement::SchemeNode(scheme) => Panel::Fields {
            fields: vec![
                select(
                    &["type"],
                    "Scheme Type",
                    scheme.scheme_type.map(SchemeType::name),
                    SchemeType::ALL.into_iter().map(SchemeType::name),
                ),
                select(
                    &["argumentationScheme"],
                    "Argumentation Scheme",
                    scheme.argumentation_scheme.map(Scheme::name),
                    Scheme::ALL.into_iter().map(Scheme::name),
                ),
            ],
        },
        GraphElement::AtomicNode(atom) => Panel::Fields {
            fields: vec![
                multiline(&["text"], "Text", atom.text.clone()),
                multiline(
                    &["reference", "text"],
                    "Original Text",
                    atom.reference
                        .as_ref()
                        .map(|r| r.text.clone())
                        .unwrap_or_default(),
                ),
            ],
        },
        GraphElement::Edge(edge) => Panel::ReadOnly { edge: *edge },
        GraphElement::NoSelection(meta) => Panel::Actions {
            graph: *meta,
            groups: action_menu(),
            note: config.dark_mode.then_some(DARK_MODE_NOTE),
        },
    }
}

fn select(
    path: &[&str],
    label: &'static str,
    value: Option<&'static str>,
    names: impl Iterator<Item = &'static str>,
) -> Field {
    let options = std::iter::once(SelectOption {
        value: None,
        label: UNKNOWN_LABEL,
    })
    .chain(names.map(|name| SelectOption {
        value: Some(name),
        label: name,
    }))
    .collect();

    Field {
        path: PropertyPath::from_segments(path),
        label,
        widget: Widget::Select { value, options },
    }
}

fn multiline(path: &[&str], label: &'static str, value: String) -> Field {
    Field {
        path: PropertyPath::from_segments(path),
        label,
        widget: Widget::Multiline {
            value,
            min_rows: TEXT_MIN_ROWS,
        },
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ab_core::{ArgGraph, AtomNode, ElementId, Reference, SchemeNode};
    use pretty_assertions::assert_eq;

    fn paths(panel: &Panel) -> Vec<String> {
        panel.fields().iter().map(|f| f.path.to_string()).collect()
    }

    #[test]
    fn scheme_node_gets_two_selects() {
        let element = GraphElement::SchemeNode(SchemeNode::new(
            ElementId::intern("s1"),
            Some(SchemeType::Support),
        ));
        let panel = panel_for(&element, &InspectorConfig::default());
        assert_eq!(paths(&panel), ["type", "argumentationScheme"]);

        match &panel.fields()[0].widget {
            Widget::Select { value, options } => {
                assert_eq!(*value, Some("Support"));
                assert_eq!(options.len(), SchemeType::ALL.len() + 1);
                assert_eq!(
                    options[0],
                    SelectOption {
                        value: None,
                        label: "Unknown"
                    }
                );
            }
            other => panic!("expected select, got {other:?}"),
        }
        match &panel.fields()[1].widget {
            Widget::Select { value, options } => {
                assert_eq!(*value, None);
                assert_eq!(options.len(), Scheme::ALL.len() + 1);
            }
            other => panic!("expected select, got {other:?}"),
        }
    }

    #[test]
    fn atomic_node_gets_independent_text_fields() {
        let element = GraphElement::AtomicNode(AtomNode {
            id: ElementId::intern("a1"),
            text: "claim".into(),
            reference: Some(Reference {
                text: "source".into(),
            }),
        });
        let panel = panel_for(&element, &InspectorConfig::default());
        assert_eq!(paths(&panel), ["text", "reference.text"]);

        let values: Vec<_> = panel
            .fields()
            .iter()
            .map(|f| match &f.widget {
                Widget::Multiline { value, min_rows } => {
                    assert_eq!(*min_rows, 3);
                    value.as_str()
                }
                other => panic!("expected text, got {other:?}"),
            })
            .collect();
        assert_eq!(values, ["claim", "source"]);
    }

    #[test]
    fn edge_is_read_only() {
        let graph = ArgGraph::demo();
        let edge = graph.element(ElementId::intern("e1")).unwrap();
        let panel = panel_for(&edge, &InspectorConfig::default());
        assert!(matches!(panel, Panel::ReadOnly { .. }));
        assert!(panel.fields().is_empty());
    }

    #[test]
    fn no_selection_shows_actions_and_dark_note() {
        let graph = ArgGraph::demo();
        let meta = GraphElement::NoSelection(graph.meta());

        let light = panel_for(&meta, &InspectorConfig::default());
        match light {
            Panel::Actions { groups, note, .. } => {
                assert_eq!(groups.len(), 3);
                assert_eq!(note, None);
            }
            other => panic!("expected actions, got {other:?}"),
        }

        let dark = InspectorConfig {
            dark_mode: true,
            ..InspectorConfig::default()
        };
        match panel_for(&meta, &dark) {
            Panel::Actions { note, .. } => assert!(note.is_some()),
            other => panic!("expected actions, got {other:?}"),
        }
    }

    #[test]
    fn panel_serializes_for_hosts() {
        let element = GraphElement::AtomicNode(AtomNode::new(ElementId::intern("a2"), "hi"));
        let json = serde_json::to_value(panel_for(&element, &InspectorConfig::default())).unwrap();
        assert_eq!(json["panel"], "fields");
        assert_eq!(json["fields"][1]["path"], "reference.text");
        assert_eq!(json["fields"][1]["widget"]["kind"], "multiline");
        assert_eq!(json["fields"][1]["widget"]["minRows"], 3);
    }
}
