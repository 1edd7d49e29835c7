//! Edit sessions: the inspector's state machine.
//!
//! ```text
//!            select                 edit
//!   Idle ───────────────▶ Clean ───────────▶ Dirty ◀─┐ edit
//!    ▲  ◀─────────────── │  ▲ │ select        │  │ ──┘
//!    │      unselect     │  │ └──────┘        │  │
//!    │                   │  └──── save ───────┘  │
//!    └──────────────────────────── discard ──────┘
//! ```
//!
//! While `Dirty` the store is made unselectable, so the user cannot switch
//! to another element and lose the pending edits. Save and discard are the
//! only ways out of `Dirty`; both restore selectability exactly once.

use crate::actions::{self, ActionContext, ActionOutcome, ExportError, InspectorAction};
use crate::config::InspectorConfig;
use crate::draft::{Draft, EditError, EditValue, apply_edit, open_draft};
use crate::fields::{Field, Panel, panel_for};
use crate::store::{ElementStore, SelectionEvent, StoreError};
use ab_core::{ElementId, GraphElement, GraphError, PropertyPath};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    /// Nothing selected.
    Idle,
    /// An element is selected and its draft equals the baseline.
    Clean,
    /// The draft has unsaved edits.
    Dirty,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no element is being edited")]
    NoSession,

    #[error("element `{0}` has unsaved edits; save or discard them first")]
    PendingEdits(ElementId),

    #[error("there are no edits to save or discard")]
    NothingPending,

    #[error("graph actions are only available when nothing is selected")]
    ActionUnavailable,

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Baseline, working draft, and dirty flag for the selected element.
#[derive(Debug, Clone)]
pub struct EditSession {
    id: ElementId,
    baseline: Draft,
    draft: Draft,
    dirty: bool,
}

impl EditSession {
    fn open(element: &GraphElement) -> Self {
        let baseline = open_draft(element);
        Self {
            id: element.id(),
            draft: baseline.clone(),
            baseline,
            dirty: false,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The snapshot taken when the session opened (or at the last save).
    pub fn baseline(&self) -> &Draft {
        &self.baseline
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// The inspector controller. Owns at most one `EditSession`.
#[derive(Debug, Default)]
pub struct Inspector {
    session: Option<EditSession>,
    config: InspectorConfig,
}

impl Inspector {
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            session: None,
            config,
        }
    }

    pub fn state(&self) -> SessionState {
        match &self.session {
            None => SessionState::Idle,
            Some(session) if session.dirty => SessionState::Dirty,
            Some(_) => SessionState::Clean,
        }
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut InspectorConfig {
        &mut self.config
    }

    fn pending(&self) -> Option<ElementId> {
        self.session.as_ref().filter(|s| s.dirty).map(|s| s.id)
    }

    /// React to a selection change reported by the store.
    ///
    /// A new selection replaces a clean session. Events that would drop a
    /// dirty session are refused and leave it untouched.
    pub fn handle_event<S: ElementStore + ?Sized>(
        &mut self,
        store: &S,
        event: SelectionEvent,
    ) -> Result<SessionState, SessionError> {
        if let Some(id) = self.pending() {
            log::warn!("ignoring {event:?}: {id} has unsaved edits");
            return Err(SessionError::PendingEdits(id));
        }

        match event {
            SelectionEvent::Select(id) => {
                let element = store
                    .get_by_id(id)
                    .ok_or(StoreError::Graph(GraphError::UnknownElement(id)))?;
                log::debug!("session: open {} {id}", element.kind_name());
                self.session = Some(EditSession::open(&element));
            }
            SelectionEvent::Unselect => {
                if let Some(session) = self.session.take() {
                    log::debug!("session: close {}", session.id);
                }
            }
        }
        Ok(self.state())
    }

    /// Apply an edit to the draft. The first edit of a session locks selection.
    pub fn edit<S: ElementStore + ?Sized>(
        &mut self,
        store: &mut S,
        path: &PropertyPath,
        value: EditValue,
    ) -> Result<SessionState, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoSession)?;
        session.draft = apply_edit(&session.draft, path, value)?;

        if !session.dirty {
            session.dirty = true;
            store.set_selectable(false);
            log::debug!("session: {} dirty, selection locked", session.id);
        }
        Ok(SessionState::Dirty)
    }

    /// Edit through a field from the current panel.
    pub fn edit_field<S: ElementStore + ?Sized>(
        &mut self,
        store: &mut S,
        field: &Field,
        value: EditValue,
    ) -> Result<SessionState, SessionError> {
        self.edit(store, &field.path, value)
    }

    /// Write the draft back to the store and unlock selection.
    ///
    /// The element stays selected; the saved draft becomes the new baseline.
    /// If the store rejects the write the session stays dirty.
    pub fn save<S: ElementStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<ElementId, SessionError> {
        let session = self
            .session
            .as_mut()
            .filter(|s| s.dirty)
            .ok_or(SessionError::NothingPending)?;

        store.write_attributes(session.id, session.draft.element())?;
        session.baseline = session.draft.clone();
        session.dirty = false;
        store.set_selectable(true);

        log::debug!("session: saved {}", session.id);
        Ok(session.id)
    }

    /// Drop the draft, unlock and clear the selection. The store is not written.
    pub fn discard<S: ElementStore + ?Sized>(&mut self, store: &mut S) -> Result<(), SessionError> {
        let id = self.pending().ok_or(SessionError::NothingPending)?;
        self.session = None;
        store.set_selectable(true);
        store.clear_selection();

        log::debug!("session: discarded edits to {id}");
        Ok(())
    }

    /// The panel for the current draft, or the graph actions when idle.
    pub fn panel<S: ElementStore + ?Sized>(&self, store: &S) -> Panel {
        match &self.session {
            Some(session) => panel_for(session.draft.element(), &self.config),
            None => panel_for(&store.current_snapshot(), &self.config),
        }
    }

    /// Perform a graph-level action. Only available while idle.
    ///
    /// Resets must already be confirmed by the host
    /// (`InspectorAction::requires_confirmation`).
    pub fn perform<S: ElementStore + ?Sized>(
        &mut self,
        store: &mut S,
        action: InspectorAction,
        ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, SessionError> {
        if self.session.is_some() {
            return Err(SessionError::ActionUnavailable);
        }

        let outcome = actions::run_action(store.export_state(), action, &self.config, ctx)?;
        if let ActionOutcome::GraphReset(preset) = outcome {
            store.reset_graph(preset);
        }
        Ok(outcome)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────
