//! The element store: authoritative graph, selection, and interaction lock.
//!
//! The inspector never touches the graph directly. It reads snapshots,
//! writes saved drafts back by id, and toggles selectability while an edit
//! is pending. `GraphStore` is the in-memory implementation used by the
//! wasm bridge and the tests.

use ab_core::{ArgGraph, ElementId, GraphElement, GraphError};
use serde::{Deserialize, Serialize};

/// Selection changes reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Select(ElementId),
    Unselect,
}

/// What a graph reset replaces the current graph with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphPreset {
    Empty,
    Demo,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("attributes for `{expected}` carry the id `{found}`")]
    IdMismatch { expected: ElementId, found: ElementId },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// The narrow interface the inspector needs from the graph host.
pub trait ElementStore {
    /// Data of the selected element, or graph metadata when nothing is selected.
    fn current_snapshot(&self) -> GraphElement;

    fn get_by_id(&self, id: ElementId) -> Option<GraphElement>;

    /// Replace the attributes of element `id`.
    fn write_attributes(&mut self, id: ElementId, element: &GraphElement)
    -> Result<(), StoreError>;

    /// Allow or forbid changing the selection.
    fn set_selectable(&mut self, selectable: bool);

    fn is_selectable(&self) -> bool;

    fn clear_selection(&mut self);

    fn reset_graph(&mut self, preset: GraphPreset);

    /// The graph as it should be exported.
    fn export_state(&self) -> &ArgGraph;
}

/// In-memory element store over an `ArgGraph`.
#[derive(Debug, Clone)]
pub struct GraphStore {
    graph: ArgGraph,
    selected: Option<ElementId>,
    selectable: bool,
    /// Bumped on every write or reset.
    revision: u64,
}

impl GraphStore {
    pub fn new(graph: ArgGraph) -> Self {
        Self {
            graph,
            selected: None,
            selectable: true,
            revision: 0,
        }
    }

    /// Select a node or edge. Returns the event to feed to the inspector, or
    /// `None` when selection is locked, the id is unknown, or it is already
    /// selected.
    pub fn select(&mut self, id: ElementId) -> Option<SelectionEvent> {
        if !self.selectable {
            log::debug!("select {id} ignored: elements are not selectable");
            return None;
        }
        if self.selected == Some(id) || id == self.graph.id {
            return None;
        }
        self.graph.element(id)?;
        self.selected = Some(id);
        Some(SelectionEvent::Select(id))
    }

    /// Drop the current selection. `None` when locked or nothing is selected.
    pub fn unselect(&mut self) -> Option<SelectionEvent> {
        if !self.selectable {
            log::debug!("unselect ignored: elements are not selectable");
            return None;
        }
        self.selected.take().map(|_| SelectionEvent::Unselect)
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn graph(&self) -> &ArgGraph {
        &self.graph
    }

    /// Swap in a whole new graph (e.g. one loaded from a file).
    pub fn replace_graph(&mut self, graph: ArgGraph) {
        self.graph = graph;
        self.selected = None;
        self.selectable = true;
        self.revision += 1;
    }
}

impl ElementStore for GraphStore {
    fn current_snapshot(&self) -> GraphElement {
        self.selected
            .and_then(|id| self.graph.element(id))
            .unwrap_or_else(|| GraphElement::NoSelection(self.graph.meta()))
    }

    fn get_by_id(&self, id: ElementId) -> Option<GraphElement> {
        self.graph.element(id)
    }

    fn write_attributes(
        &mut self,
        id: ElementId,
        element: &GraphElement,
    ) -> Result<(), StoreError> {
        if element.id() != id {
            return Err(StoreError::IdMismatch {
                expected: id,
                found: element.id(),
            });
        }
        self.graph.set_element(element)?;
        self.revision += 1;
        log::debug!("store: wrote {id} (revision {})", self.revision);
        Ok(())
    }

    fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    fn is_selectable(&self) -> bool {
        self.selectable
    }

    fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn reset_graph(&mut self, preset: GraphPreset) {
        let graph = match preset {
            GraphPreset::Empty => ArgGraph::new(ElementId::fresh("graph")),
            GraphPreset::Demo => ArgGraph::demo(),
        };
        log::debug!("store: reset to {preset:?} graph");
        self.replace_graph(graph);
    }

    fn export_state(&self) -> &ArgGraph {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_core::AtomNode;

    #[test]
    fn select_and_unselect_emit_events() {
        let mut store = GraphStore::new(ArgGraph::demo());
        let claim = ElementId::intern("claim");

        assert_eq!(store.select(claim), Some(SelectionEvent::Select(claim)));
        assert_eq!(store.select(claim), None);
        assert_eq!(store.current_snapshot().id(), claim);

        assert_eq!(store.unselect(), Some(SelectionEvent::Unselect));
        assert_eq!(store.unselect(), None);
        assert!(matches!(
            store.current_snapshot(),
            GraphElement::NoSelection(_)
        ));
    }

    #[test]
    fn locked_store_refuses_selection_changes() {
        let mut store = GraphStore::new(ArgGraph::demo());
        store.select(ElementId::intern("claim"));
        store.set_selectable(false);

        assert_eq!(store.select(ElementId::intern("premise")), None);
        assert_eq!(store.unselect(), None);
        assert_eq!(store.selected(), Some(ElementId::intern("claim")));
    }

    #[test]
    fn unknown_ids_are_not_selectable() {
        let mut store = GraphStore::new(ArgGraph::demo());
        assert_eq!(store.select(ElementId::intern("nowhere")), None);
    }

    #[test]
    fn write_checks_id_and_bumps_revision() {
        let mut store = GraphStore::new(ArgGraph::demo());
        let claim = ElementId::intern("claim");
        let element = GraphElement::AtomicNode(AtomNode::new(claim, "Changed"));

        let err = store
            .write_attributes(ElementId::intern("premise"), &element)
            .unwrap_err();
        assert!(matches!(err, StoreError::IdMismatch { .. }));
        assert_eq!(store.revision(), 0);

        store.write_attributes(claim, &element).unwrap();
        assert_eq!(store.revision(), 1);
        assert_eq!(store.get_by_id(claim), Some(element));
    }

    #[test]
    fn reset_replaces_graph_and_unlocks() {
        let mut store = GraphStore::new(ArgGraph::demo());
        store.select(ElementId::intern("claim"));
        store.set_selectable(false);

        store.reset_graph(GraphPreset::Empty);
        assert!(store.is_selectable());
        assert_eq!(store.selected(), None);
        assert_eq!(store.export_state().meta().node_count, 0);
    }
}
