//! Conversions from the argument graph to exchange formats.
//!
//! - **Arguebuf JSON**: id-keyed node and edge maps, the editor's native
//!   exchange format.
//! - **AIF** (Argument Interchange Format): flat node/edge lists where every
//!   scheme node becomes an `RA`/`CA`/`MA`/`PA` node.
//!
//! Both are pure functions of the graph; callers decide how to deliver them.
//! Arguebuf can also be read back with [`from_arguebuf`].

use crate::id::ElementId;
use crate::model::{ArgGraph, ArgNode, AtomNode, Reference, Scheme, SchemeNode, SchemeType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

pub const ARGUEBUF_VERSION: &str = "1";

// ─── Arguebuf ────────────────────────────────────────────────────────────

/// Serialize the graph as arguebuf JSON.
#[must_use]
pub fn to_arguebuf(graph: &ArgGraph) -> Value {
    let mut nodes = Map::new();
    for node in graph.nodes() {
        let value = match node {
            ArgNode::Atom(atom) => {
                let mut body = Map::new();
                body.insert("text".into(), Value::String(atom.text.clone()));
                if let Some(reference) = &atom.reference {
                    body.insert("reference".into(), json!({ "text": reference.text }));
                }
                json!({ "atom": body })
            }
            ArgNode::Scheme(scheme) => json!({ "scheme": arguebuf_scheme(scheme) }),
        };
        nodes.insert(node.id().as_str().to_string(), value);
    }

    let mut edges = Map::new();
    for edge in graph.edges() {
        edges.insert(
            edge.id.as_str().to_string(),
            json!({ "source": edge.source.as_str(), "target": edge.target.as_str() }),
        );
    }

    json!({
        "version": ARGUEBUF_VERSION,
        "id": graph.id.as_str(),
        "nodes": nodes,
        "edges": edges,
    })
}

/// Key used for scheme nodes that name a scheme but have no type.
const UNTYPED_SCHEME_KEY: &str = "unknown";

/// `{ "<type>": "<scheme name>" | null }`. Untyped schemes keep their name
/// under `"unknown"`; with neither a type nor a name the body is `{}`.
fn arguebuf_scheme(scheme: &SchemeNode) -> Value {
    let name = scheme
        .argumentation_scheme
        .map(|s| Value::String(s.name().to_string()));
    let mut body = Map::new();
    match (scheme.scheme_type, name) {
        (Some(ty), name) => {
            body.insert(ty.name().to_lowercase(), name.unwrap_or(Value::Null));
        }
        (None, Some(name)) => {
            body.insert(UNTYPED_SCHEME_KEY.into(), name);
        }
        (None, None) => {}
    }
    Value::Object(body)
}

/// Inverse of [`arguebuf_scheme`]. Unknown scheme names become `None`.
fn scheme_from_arguebuf(id: ElementId, body: &Map<String, Value>) -> Result<SchemeNode, String> {
    let mut scheme = SchemeNode::new(id, None);
    let mut entries = body.iter();
    let Some((key, name)) = entries.next() else {
        return Ok(scheme);
    };
    if entries.next().is_some() {
        return Err(format!("scheme `{id}` has more than one type"));
    }
    if key != UNTYPED_SCHEME_KEY {
        let ty = SchemeType::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| format!("scheme `{id}` has unknown type `{key}`"))?;
        scheme.scheme_type = Some(ty);
    }
    scheme.argumentation_scheme = match name {
        Value::Null => None,
        Value::String(name) => Scheme::from_name(name),
        other => return Err(format!("scheme `{id}` has a non-string name: {other}")),
    };
    Ok(scheme)
}

#[derive(Debug, Deserialize)]
struct ArguebufDoc {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    nodes: BTreeMap<String, ArguebufNode>,
    #[serde(default)]
    edges: BTreeMap<String, ArguebufEdge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ArguebufNode {
    Atom {
        text: String,
        #[serde(default)]
        reference: Option<Reference>,
    },
    Scheme(Map<String, Value>),
}

#[derive(Debug, Deserialize)]
struct ArguebufEdge {
    source: String,
    target: String,
}

/// Read an arguebuf document back into a graph.
///
/// Ids must be valid and unique across the graph, its nodes, and its edges.
/// Edges must connect nodes present in the document. Unknown scheme names
/// become `None`; unknown scheme types are an error.
pub fn from_arguebuf(value: &Value) -> Result<ArgGraph, String> {
    let doc = ArguebufDoc::deserialize(value).map_err(|e| format!("invalid arguebuf: {e}"))?;
    let id = match doc.id.as_deref() {
        Some(id) => ElementId::parse(id)?,
        None => ElementId::fresh("graph"),
    };
    let mut graph = ArgGraph::new(id);

    for (node_id, node) in doc.nodes {
        let node_id = unused_id(&graph, &node_id)?;
        match node {
            ArguebufNode::Atom { text, reference } => {
                graph.add_atom(AtomNode {
                    id: node_id,
                    text,
                    reference,
                });
            }
            ArguebufNode::Scheme(body) => {
                graph.add_scheme(scheme_from_arguebuf(node_id, &body)?);
            }
        }
    }

    for (edge_id, edge) in doc.edges {
        let id = unused_id(&graph, &edge_id)?;
        let endpoints = ElementId::lookup(&edge.source).zip(ElementId::lookup(&edge.target));
        endpoints
            .and_then(|(source, target)| graph.add_edge(id, source, target))
            .ok_or_else(|| {
                format!(
                    "edge `{edge_id}` connects unknown nodes `{}` -> `{}`",
                    edge.source, edge.target
                )
            })?;
    }
    Ok(graph)
}

fn unused_id(graph: &ArgGraph, id: &str) -> Result<ElementId, String> {
    let id = ElementId::parse(id)?;
    if graph.contains(id) {
        return Err(format!("duplicate id `{id}`"));
    }
    Ok(id)
}

// ─── AIF ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AifGraph {
    nodes: Vec<AifNode>,
    edges: Vec<AifEdge>,
    locutions: Vec<Value>,
    participants: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct AifNode {
    #[serde(rename = "nodeID")]
    node_id: String,
    text: String,
    #[serde(rename = "type")]
    node_type: &'static str,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct AifEdge {
    #[serde(rename = "edgeID")]
    edge_id: String,
    #[serde(rename = "fromID")]
    from_id: String,
    #[serde(rename = "toID")]
    to_id: String,
    #[serde(rename = "formEdgeID")]
    form_edge_id: Option<String>,
}

/// Serialize the graph as AIF JSON.
///
/// AIF has no untyped scheme node, so schemes with an unknown type are
/// exported as default inferences (`RA`).
#[must_use]
pub fn to_aif(graph: &ArgGraph) -> Value {
    let nodes = graph
        .nodes()
        .map(|node| match node {
            ArgNode::Atom(atom) => AifNode {
                node_id: atom.id.as_str().to_string(),
                text: atom.text.clone(),
                node_type: "I",
                timestamp: String::new(),
            },
            ArgNode::Scheme(scheme) => {
                let (node_type, default_text) = aif_scheme_kind(scheme.scheme_type);
                AifNode {
                    node_id: scheme.id.as_str().to_string(),
                    text: scheme
                        .argumentation_scheme
                        .map(|s| s.name())
                        .unwrap_or(default_text)
                        .to_string(),
                    node_type,
                    timestamp: String::new(),
                }
            }
        })
        .collect();

    let edges = graph
        .edges()
        .map(|edge| AifEdge {
            edge_id: edge.id.as_str().to_string(),
            from_id: edge.source.as_str().to_string(),
            to_id: edge.target.as_str().to_string(),
            form_edge_id: None,
        })
        .collect();

    let aif = AifGraph {
        nodes,
        edges,
        locutions: Vec::new(),
        participants: Vec::new(),
    };
    // Plain strings and vectors only; serialization cannot fail.
    serde_json::to_value(aif).unwrap_or(Value::Null)
}

fn aif_scheme_kind(ty: Option<SchemeType>) -> (&'static str, &'static str) {
    match ty {
        Some(SchemeType::Support) | None => ("RA", "Default Inference"),
        Some(SchemeType::Attack) => ("CA", "Default Conflict"),
        Some(SchemeType::Rephrase) => ("MA", "Default Rephrase"),
        Some(SchemeType::Preference) => ("PA", "Default Preference"),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────
