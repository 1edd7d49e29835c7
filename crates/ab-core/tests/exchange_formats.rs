//! Integration tests: exporting and re-importing whole graphs.

use ab_core::{
    ArgGraph, AtomNode, ElementId, GraphElement, Reference, Scheme, SchemeNode, SchemeType,
    from_arguebuf, to_aif, to_arguebuf,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn edited_demo() -> ArgGraph {
    let mut graph = ArgGraph::demo();
    let mut claim = AtomNode::new(ElementId::intern("claim"), "Edited claim");
    claim.reference = Some(Reference {
        text: "as quoted".into(),
    });
    graph.set_element(&GraphElement::AtomicNode(claim)).unwrap();

    let mut support = SchemeNode::new(ElementId::intern("support"), Some(SchemeType::Rephrase));
    support.argumentation_scheme = Some(Scheme::ALL[0]);
    graph.set_element(&GraphElement::SchemeNode(support)).unwrap();

    // Type cleared, scheme kept.
    let mut attack = SchemeNode::new(ElementId::intern("attack"), None);
    attack.argumentation_scheme = Some(Scheme::ALL[1]);
    graph.set_element(&GraphElement::SchemeNode(attack)).unwrap();
    graph
}

// ─── Arguebuf ───────────────────────────────────────────────────────────

#[test]
fn saved_edits_survive_an_arguebuf_round_trip() {
    let graph = edited_demo();
    let loaded = from_arguebuf(&to_arguebuf(&graph)).unwrap();

    for id in ["claim", "support", "attack", "e1"] {
        let id = ElementId::intern(id);
        assert_eq!(loaded.element(id), graph.element(id), "element {id}");
    }
    assert_eq!(loaded.meta(), graph.meta());

    match loaded.element(ElementId::intern("attack")) {
        Some(GraphElement::SchemeNode(attack)) => {
            assert_eq!(attack.scheme_type, None);
            assert_eq!(attack.argumentation_scheme, Some(Scheme::ALL[1]));
        }
        other => panic!("expected the attack scheme, got {other:?}"),
    }
}

#[test]
fn import_tolerates_unknown_scheme_names() {
    let doc = json!({
        "id": "imported",
        "nodes": {
            "s": { "scheme": { "attack": "Argument From Nowhere" } },
            "t": { "scheme": {} },
        },
    });
    let graph = from_arguebuf(&doc).unwrap();

    assert_eq!(
        graph.element(ElementId::intern("s")),
        Some(GraphElement::SchemeNode(SchemeNode::new(
            ElementId::intern("s"),
            Some(SchemeType::Attack),
        )))
    );
    assert_eq!(
        graph.element(ElementId::intern("t")),
        Some(GraphElement::SchemeNode(SchemeNode::new(
            ElementId::intern("t"),
            None
        )))
    );
}

#[test]
fn import_rejects_malformed_documents() {
    assert!(from_arguebuf(&json!({ "nodes": { "a": { "circle": {} } } })).is_err());
    assert!(from_arguebuf(&json!([1, 2, 3])).is_err());
    assert!(from_arguebuf(&json!({ "nodes": { "s": { "scheme": { "rebut": null } } } })).is_err());
}

#[test]
fn import_rejects_ids_used_twice() {
    let doc = json!({
        "id": "dup",
        "nodes": {
            "a": { "atom": { "text": "x" } },
            "dup": { "atom": { "text": "y" } },
        },
    });
    let err = from_arguebuf(&doc).unwrap_err();
    assert!(err.contains("dup"), "{err}");
}

// ─── AIF ────────────────────────────────────────────────────────────────

#[test]
fn aif_reflects_scheme_type_changes() {
    let value = to_aif(&edited_demo());
    let support = value["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["nodeID"] == "support")
        .unwrap();
    assert_eq!(support["type"], "MA");
    assert_eq!(support["text"], Scheme::ALL[0].name());
}
