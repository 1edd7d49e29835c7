//! WASM bridge for the argument-graph inspector.
//!
//! Compiled via `wasm-pack build --target web`. The host page forwards
//! selection changes and field edits; every call answers with a JSON string
//! `{"ok":true,...}` or `{"ok":false,"error":"..."}`.

mod browser;

use ab_core::{ElementId, PropertyPath, from_arguebuf};
use ab_editor::{
    ActionContext, EditValue, ElementStore, GraphStore, Inspector, InspectorAction,
    InspectorConfig, JsonExport, SessionError, SessionState,
};
use browser::{DownloadSink, JsRasterizer};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct Reply<'a> {
    ok: bool,
    state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
}

fn ok(inspector: &Inspector) -> String {
    let reply = Reply {
        ok: true,
        state: inspector.state(),
        id: inspector.session().map(|s| s.id().as_str()),
    };
    serde_json::to_string(&reply).unwrap_or_else(|e| failure(e))
}

fn failure(err: impl std::fmt::Display) -> String {
    serde_json::json!({ "ok": false, "error": err.to_string() }).to_string()
}

/// The inspector panel and the graph it edits.
///
/// The page owns rendering and hit testing; it calls `select`/`unselect`
/// and checks `is_selectable` before changing its own highlight.
#[wasm_bindgen]
pub struct InspectorPanel {
    store: GraphStore,
    inspector: Inspector,
    rasterizer: JsRasterizer,
    sink: DownloadSink,
}

#[wasm_bindgen]
impl InspectorPanel {
    /// Start with the demo graph.
    #[wasm_bindgen(constructor)]
    pub fn new(dark_mode: bool) -> Self {
        console_error_panic_hook_setup();
        let config = InspectorConfig {
            dark_mode,
            ..InspectorConfig::default()
        };
        Self {
            store: GraphStore::new(ab_core::ArgGraph::demo()),
            inspector: Inspector::new(config),
            rasterizer: JsRasterizer::default(),
            sink: DownloadSink,
        }
    }

    /// Replace the graph with an arguebuf document. Refused while edits are pending.
    pub fn load_graph(&mut self, json: &str) -> String {
        if let Some(session) = self.inspector.session().filter(|s| s.is_dirty()) {
            return failure(SessionError::PendingEdits(session.id()));
        }
        let value: serde_json::Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(e) => return failure(e),
        };
        match from_arguebuf(&value) {
            Ok(graph) => {
                self.store.replace_graph(graph);
                self.apply(|inspector, store| {
                    inspector.handle_event(&*store, ab_editor::SelectionEvent::Unselect)
                })
            }
            Err(e) => failure(e),
        }
    }

    /// Select a node or edge by id. Unknown ids leave the session as it is.
    pub fn select(&mut self, id: &str) -> String {
        let Some(id) = ElementId::lookup(id) else {
            log::debug!("select `{id}` ignored: no such element");
            return ok(&self.inspector);
        };
        match self.store.select(id) {
            Some(event) => self.apply(|inspector, store| inspector.handle_event(&*store, event)),
            None => ok(&self.inspector),
        }
    }

    pub fn unselect(&mut self) -> String {
        match self.store.unselect() {
            Some(event) => self.apply(|inspector, store| inspector.handle_event(&*store, event)),
            None => ok(&self.inspector),
        }
    }

    /// Whether the page may change the selection right now.
    pub fn is_selectable(&self) -> bool {
        self.store.is_selectable()
    }

    /// Edit a field of the draft. `undefined`/`null` clears a select.
    pub fn edit(&mut self, path: &str, value: Option<String>) -> String {
        let path = match PropertyPath::parse(path) {
            Ok(path) => path,
            Err(e) => return failure(e),
        };
        let value = value.map_or(EditValue::Unset, |v| EditValue::from_raw(&v));
        self.apply(|inspector, store| inspector.edit(store, &path, value))
    }

    pub fn save(&mut self) -> String {
        self.apply(|inspector, store| inspector.save(store).map(|_| SessionState::Clean))
    }

    pub fn discard(&mut self) -> String {
        self.apply(|inspector, store| inspector.discard(store).map(|_| SessionState::Idle))
    }

    /// The panel to show, as JSON.
    pub fn panel_json(&self) -> String {
        serde_json::to_string(&self.inspector.panel(&self.store)).unwrap_or_else(failure)
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.inspector.config_mut().dark_mode = dark_mode;
    }

    /// Register the callback that renders the graph to image bytes.
    pub fn set_rasterizer(&mut self, callback: js_sys::Function) {
        self.rasterizer.set_callback(callback);
    }

    /// Perform a graph action, e.g. `{"action":"Export","option":"Aif"}`.
    /// Resets must be confirmed by the page first.
    pub fn perform_action(&mut self, json: &str) -> String {
        let action: InspectorAction = match serde_json::from_str(json) {
            Ok(action) => action,
            Err(e) => return failure(e),
        };
        let mut ctx = ActionContext {
            export: &JsonExport,
            rasterizer: &mut self.rasterizer,
            sink: &mut self.sink,
            now: browser::local_now(),
        };
        match self.inspector.perform(&mut self.store, action, &mut ctx) {
            Ok(outcome) => {
                log::debug!("performed {}: {outcome:?}", action.label());
                ok(&self.inspector)
            }
            Err(e) => failure(e),
        }
    }
}

impl InspectorPanel {
    fn apply(
        &mut self,
        op: impl FnOnce(&mut Inspector, &mut GraphStore) -> Result<SessionState, SessionError>,
    ) -> String {
        match op(&mut self.inspector, &mut self.store) {
            Ok(_) => ok(&self.inspector),
            Err(e) => failure(e),
        }
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("inspector panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────
