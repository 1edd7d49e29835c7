//! Argument graph data model.
//!
//! An argument graph is a directed graph of two node kinds: *atoms* (claims,
//! premises, carrying text) and *schemes* (the inference, attack, or
//! rephrase relations between atoms). Edges connect atoms and schemes in the
//! direction of the argument flow.
//!
//! `GraphElement` is the snapshot the inspector works on: one closed variant
//! per selectable thing, plus `NoSelection` carrying graph-level metadata.

use crate::id::ElementId;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color, 8 bits per channel. Used for render backgrounds.
/// Serialized as a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`. The `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let bytes = hex.strip_prefix('#').unwrap_or(hex).as_bytes();
        let pair = |i: usize| Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?);

        match bytes.len() {
            3 => Some(Self::rgb(
                hex_val(bytes[0])? * 17,
                hex_val(bytes[1])? * 17,
                hex_val(bytes[2])? * 17,
            )),
            6 => Some(Self::rgb(pair(0)?, pair(2)?, pair(4)?)),
            8 => Some(Self {
                r: pair(0)?,
                g: pair(2)?,
                b: pair(4)?,
                a: pair(6)?,
            }),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color `{hex}`")))
    }
}

// ─── Scheme vocabularies ─────────────────────────────────────────────────

/// The relation a scheme node expresses between atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemeType {
    Support,
    Attack,
    Rephrase,
    Preference,
}

impl SchemeType {
    /// Selector order.
    pub const ALL: [SchemeType; 4] = [
        SchemeType::Support,
        SchemeType::Attack,
        SchemeType::Rephrase,
        SchemeType::Preference,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SchemeType::Support => "Support",
            SchemeType::Attack => "Attack",
            SchemeType::Rephrase => "Rephrase",
            SchemeType::Preference => "Preference",
        }
    }

    /// Look up a scheme type by its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for SchemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Argumentation schemes (after Walton) a scheme node may instantiate.
/// Serialized by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    #[serde(rename = "Argument From Analogy")]
    Analogy,
    #[serde(rename = "Argument From Cause To Effect")]
    CauseToEffect,
    #[serde(rename = "Argument From Consequences")]
    Consequences,
    #[serde(rename = "Argument From Correlation To Cause")]
    CorrelationToCause,
    #[serde(rename = "Argument From Established Rule")]
    EstablishedRule,
    #[serde(rename = "Argument From Evidence To Hypothesis")]
    EvidenceToHypothesis,
    #[serde(rename = "Argument From Example")]
    Example,
    #[serde(rename = "Argument From Expert Opinion")]
    ExpertOpinion,
    #[serde(rename = "Argument From Popular Opinion")]
    PopularOpinion,
    #[serde(rename = "Argument From Popular Practice")]
    PopularPractice,
    #[serde(rename = "Argument From Position To Know")]
    PositionToKnow,
    #[serde(rename = "Argument From Precedent")]
    Precedent,
    #[serde(rename = "Argument From Sign")]
    Sign,
    #[serde(rename = "Argument From Verbal Classification")]
    VerbalClassification,
    #[serde(rename = "Argument From Witness Testimony")]
    WitnessTestimony,
    #[serde(rename = "Circumstantial Ad Hominem")]
    CircumstantialAdHominem,
    #[serde(rename = "Direct Ad Hominem")]
    DirectAdHominem,
    #[serde(rename = "Practical Reasoning")]
    PracticalReasoning,
    #[serde(rename = "Slippery Slope")]
    SlipperySlope,
}

impl Scheme {
    /// Selector order.
    pub const ALL: [Scheme; 19] = [
        Scheme::Analogy,
        Scheme::CauseToEffect,
        Scheme::Consequences,
        Scheme::CorrelationToCause,
        Scheme::EstablishedRule,
        Scheme::EvidenceToHypothesis,
        Scheme::Example,
        Scheme::ExpertOpinion,
        Scheme::PopularOpinion,
        Scheme::PopularPractice,
        Scheme::PositionToKnow,
        Scheme::Precedent,
        Scheme::Sign,
        Scheme::VerbalClassification,
        Scheme::WitnessTestimony,
        Scheme::CircumstantialAdHominem,
        Scheme::DirectAdHominem,
        Scheme::PracticalReasoning,
        Scheme::SlipperySlope,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Analogy => "Argument From Analogy",
            Scheme::CauseToEffect => "Argument From Cause To Effect",
            Scheme::Consequences => "Argument From Consequences",
            Scheme::CorrelationToCause => "Argument From Correlation To Cause",
            Scheme::EstablishedRule => "Argument From Established Rule",
            Scheme::EvidenceToHypothesis => "Argument From Evidence To Hypothesis",
            Scheme::Example => "Argument From Example",
            Scheme::ExpertOpinion => "Argument From Expert Opinion",
            Scheme::PopularOpinion => "Argument From Popular Opinion",
            Scheme::PopularPractice => "Argument From Popular Practice",
            Scheme::PositionToKnow => "Argument From Position To Know",
            Scheme::Precedent => "Argument From Precedent",
            Scheme::Sign => "Argument From Sign",
            Scheme::VerbalClassification => "Argument From Verbal Classification",
            Scheme::WitnessTestimony => "Argument From Witness Testimony",
            Scheme::CircumstantialAdHominem => "Circumstantial Ad Hominem",
            Scheme::DirectAdHominem => "Direct Ad Hominem",
            Scheme::PracticalReasoning => "Practical Reasoning",
            Scheme::SlipperySlope => "Slippery Slope",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Nodes & edges ───────────────────────────────────────────────────────

/// Original source text an atom was extracted from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub text: String,
}

/// A claim or premise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomNode {
    pub id: ElementId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

impl AtomNode {
    pub fn new(id: ElementId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            reference: None,
        }
    }
}

/// A relation between atoms. Both attributes may be unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeNode {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub scheme_type: Option<SchemeType>,
    #[serde(rename = "argumentationScheme")]
    pub argumentation_scheme: Option<Scheme>,
}

impl SchemeNode {
    pub fn new(id: ElementId, scheme_type: Option<SchemeType>) -> Self {
        Self {
            id,
            scheme_type,
            argumentation_scheme: None,
        }
    }
}

/// Node weight stored in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgNode {
    Atom(AtomNode),
    Scheme(SchemeNode),
}

impl ArgNode {
    pub fn id(&self) -> ElementId {
        match self {
            ArgNode::Atom(atom) => atom.id,
            ArgNode::Scheme(scheme) => scheme.id,
        }
    }
}

/// Edge weight stored in the graph. Endpoints live in the graph topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgEdge {
    pub id: ElementId,
}

/// An edge as seen by the inspector: id plus endpoint node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeElement {
    pub id: ElementId,
    pub source: ElementId,
    pub target: ElementId,
}

/// Graph-level metadata shown when nothing is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMeta {
    pub id: ElementId,
    pub node_count: usize,
    pub edge_count: usize,
}

// ─── Graph elements ──────────────────────────────────────────────────────

/// Snapshot of whatever the user has selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GraphElement {
    SchemeNode(SchemeNode),
    AtomicNode(AtomNode),
    Edge(EdgeElement),
    NoSelection(GraphMeta),
}

impl GraphElement {
    pub fn id(&self) -> ElementId {
        match self {
            GraphElement::SchemeNode(scheme) => scheme.id,
            GraphElement::AtomicNode(atom) => atom.id,
            GraphElement::Edge(edge) => edge.id,
            GraphElement::NoSelection(meta) => meta.id,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            GraphElement::SchemeNode(_) => "scheme node",
            GraphElement::AtomicNode(_) => "atomic node",
            GraphElement::Edge(_) => "edge",
            GraphElement::NoSelection(_) => "graph",
        }
    }
}

impl From<ArgNode> for GraphElement {
    fn from(node: ArgNode) -> Self {
        match node {
            ArgNode::Atom(atom) => GraphElement::AtomicNode(atom),
            ArgNode::Scheme(scheme) => GraphElement::SchemeNode(scheme),
        }
    }
}

/// Failures when writing an element back into the graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("no element with id `{0}` in the graph")]
    UnknownElement(ElementId),

    #[error("element `{id}` is a {found}, cannot overwrite it with a {expected}")]
    VariantMismatch {
        id: ElementId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0} has no writable attributes")]
    ReadOnly(&'static str),
}

// ─── Argument graph ──────────────────────────────────────────────────────

/// The authoritative argument graph.
///
/// Node and edge weights are looked up by id through side indices kept in
/// sync with the `StableDiGraph`, so indices stay valid across removals.
#[derive(Debug, Clone)]
pub struct ArgGraph {
    pub id: ElementId,
    pub graph: StableDiGraph<ArgNode, ArgEdge>,
    node_index: HashMap<ElementId, NodeIndex>,
    edge_index: HashMap<ElementId, EdgeIndex>,
}

impl ArgGraph {
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            graph: StableDiGraph::new(),
            node_index: HashMap::new(),
            edge_index: HashMap::new(),
        }
    }

    pub fn add_atom(&mut self, atom: AtomNode) -> NodeIndex {
        self.add_node(ArgNode::Atom(atom))
    }

    pub fn add_scheme(&mut self, scheme: SchemeNode) -> NodeIndex {
        self.add_node(ArgNode::Scheme(scheme))
    }

    fn add_node(&mut self, node: ArgNode) -> NodeIndex {
        let id = node.id();
        let idx = self.graph.add_node(node);
        self.node_index.insert(id, idx);
        idx
    }

    /// Connect two existing nodes. Returns `None` if either endpoint is missing.
    pub fn add_edge(
        &mut self,
        id: ElementId,
        source: ElementId,
        target: ElementId,
    ) -> Option<EdgeIndex> {
        let from = *self.node_index.get(&source)?;
        let to = *self.node_index.get(&target)?;
        let idx = self.graph.add_edge(from, to, ArgEdge { id });
        self.edge_index.insert(id, idx);
        Some(idx)
    }

    /// Whether `id` is taken by the graph itself, a node, or an edge.
    pub fn contains(&self, id: ElementId) -> bool {
        id == self.id || self.node_index.contains_key(&id) || self.edge_index.contains_key(&id)
    }

    pub fn node(&self, id: ElementId) -> Option<&ArgNode> {
        self.node_index.get(&id).and_then(|&idx| self.graph.node_weight(idx))
    }

    pub fn edge(&self, id: ElementId) -> Option<EdgeElement> {
        let idx = *self.edge_index.get(&id)?;
        let (from, to) = self.graph.edge_endpoints(idx)?;
        Some(EdgeElement {
            id,
            source: self.graph[from].id(),
            target: self.graph[to].id(),
        })
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ArgNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// All edges as inspector snapshots.
    pub fn edges(&self) -> impl Iterator<Item = EdgeElement> + '_ {
        self.graph.edge_references().map(move |e| EdgeElement {
            id: e.weight().id,
            source: self.graph[e.source()].id(),
            target: self.graph[e.target()].id(),
        })
    }

    pub fn meta(&self) -> GraphMeta {
        GraphMeta {
            id: self.id,
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
        }
    }

    /// Snapshot of the element with the given id, if any.
    /// The graph's own id yields `NoSelection`.
    pub fn element(&self, id: ElementId) -> Option<GraphElement> {
        if id == self.id {
            return Some(GraphElement::NoSelection(self.meta()));
        }
        if let Some(node) = self.node(id) {
            return Some(node.clone().into());
        }
        self.edge(id).map(GraphElement::Edge)
    }

    /// Overwrite a node's attributes with the given snapshot.
    ///
    /// The variant must match the stored node; edges and the graph itself
    /// carry no writable attributes.
    pub fn set_element(&mut self, element: &GraphElement) -> Result<(), GraphError> {
        let id = element.id();
        let replacement = match element {
            GraphElement::AtomicNode(atom) => ArgNode::Atom(atom.clone()),
            GraphElement::SchemeNode(scheme) => ArgNode::Scheme(scheme.clone()),
            GraphElement::Edge(_) | GraphElement::NoSelection(_) => {
                return Err(GraphError::ReadOnly(element.kind_name()));
            }
        };

        let idx = *self
            .node_index
            .get(&id)
            .ok_or(GraphError::UnknownElement(id))?;
        let slot = &mut self.graph[idx];
        if std::mem::discriminant(slot) != std::mem::discriminant(&replacement) {
            return Err(GraphError::VariantMismatch {
                id,
                expected: element.kind_name(),
                found: GraphElement::from(slot.clone()).kind_name(),
            });
        }

        log::trace!("graph {}: overwrite {id}", self.id);
        *slot = replacement;
        Ok(())
    }

    /// A small sample debate: a claim, two premises, one support and one attack.
    pub fn demo() -> Self {
        let mut graph = ArgGraph::new(ElementId::intern("demo"));

        let claim = ElementId::intern("claim");
        let premise = ElementId::intern("premise");
        let objection = ElementId::intern("objection");
        let support = ElementId::intern("support");
        let attack = ElementId::intern("attack");

        graph.add_atom(AtomNode::new(
            claim,
            "The city should build a new bike lane on Main Street.",
        ));
        graph.add_atom(AtomNode {
            id: premise,
            text: "Bike lanes reduce traffic accidents.".into(),
            reference: Some(Reference {
                text: "Studies show that dedicated bike lanes cut accidents by a third.".into(),
            }),
        });
        graph.add_atom(AtomNode::new(
            objection,
            "Main Street is too narrow for an extra lane.",
        ));

        let mut support_node = SchemeNode::new(support, Some(SchemeType::Support));
        support_node.argumentation_scheme = Some(Scheme::Consequences);
        graph.add_scheme(support_node);
        graph.add_scheme(SchemeNode::new(attack, Some(SchemeType::Attack)));

        for (id, from, to) in [
            ("e1", premise, support),
            ("e2", support, claim),
            ("e3", objection, attack),
            ("e4", attack, claim),
        ] {
            graph.add_edge(ElementId::intern(id), from, to);
        }

        graph
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────
