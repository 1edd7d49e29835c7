//! Inspector engine for argument graphs.
//!
//! Selecting an element opens an edit session over an isolated draft; edits
//! replace the draft, and the session ends with an explicit save or discard.
//! See `session` for the state machine.

pub mod actions;
pub mod config;
pub mod draft;
pub mod fields;
pub mod session;
pub mod store;

pub use actions::{
    ActionContext, ActionOutcome, Background, ExportBridge, ExportError, ExportFormat, FileSink,
    InspectorAction, JsonExport, RasterFormat, RasterOptions, Rasterizer, RenderPreset,
};
pub use config::InspectorConfig;
pub use draft::{Draft, EditError, EditValue, UNSET_SENTINEL, apply_edit, open_draft};
pub use fields::{Field, Panel, Widget, panel_for};
pub use session::{EditSession, Inspector, SessionError, SessionState};
pub use store::{ElementStore, GraphPreset, GraphStore, SelectionEvent, StoreError};
