//! Integration tests: graph-level actions from the no-selection panel.
//!
//! Export and render go through fake collaborators that record what they
//! were asked to produce and deliver.

use ab_core::{
    ArgGraph, ElementId, FileKind, PropertyPath, Timestamp, from_arguebuf, to_arguebuf,
};
use ab_editor::{
    ActionContext, ActionOutcome, Background, ElementStore, ExportError, ExportFormat, FileSink,
    GraphPreset, GraphStore, Inspector, InspectorAction, InspectorConfig, JsonExport, Panel,
    RasterFormat, RasterOptions, Rasterizer, RenderPreset, SessionError,
};
use pretty_assertions::assert_eq;

// ─── Fakes ──────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeRasterizer {
    requests: Vec<RasterOptions>,
}

impl Rasterizer for FakeRasterizer {
    fn rasterize(&mut self, options: &RasterOptions) -> Result<Vec<u8>, ExportError> {
        self.requests.push(*options);
        Ok(vec![0x89, b'P', b'N', b'G'])
    }
}

#[derive(Default)]
struct RecordingSink {
    files: Vec<(String, FileKind, Vec<u8>)>,
    fail: bool,
}

impl FileSink for RecordingSink {
    fn deliver(&mut self, filename: &str, kind: FileKind, bytes: &[u8]) -> Result<(), ExportError> {
        if self.fail {
            return Err(ExportError::Deliver {
                filename: filename.to_string(),
                reason: "disk full".into(),
            });
        }
        self.files.push((filename.to_string(), kind, bytes.to_vec()));
        Ok(())
    }
}

struct Harness {
    store: GraphStore,
    inspector: Inspector,
    rasterizer: FakeRasterizer,
    sink: RecordingSink,
}

impl Harness {
    fn new(config: InspectorConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            store: GraphStore::new(ArgGraph::demo()),
            inspector: Inspector::new(config),
            rasterizer: FakeRasterizer::default(),
            sink: RecordingSink::default(),
        }
    }

    fn perform(&mut self, action: InspectorAction) -> Result<ActionOutcome, SessionError> {
        let mut ctx = ActionContext {
            export: &JsonExport,
            rasterizer: &mut self.rasterizer,
            sink: &mut self.sink,
            // 2024-02-29 13:45:07 UTC
            now: Timestamp::from_unix_seconds(1_709_214_307),
        };
        self.inspector.perform(&mut self.store, action, &mut ctx)
    }
}

// ─── Export ─────────────────────────────────────────────────────────────

#[test]
fn arguebuf_export_is_a_timestamped_json_file() {
    let mut h = Harness::new(InspectorConfig::default());
    let outcome = h
        .perform(InspectorAction::Export(ExportFormat::Arguebuf))
        .unwrap();

    assert_eq!(
        outcome,
        ActionOutcome::Delivered {
            filename: "2024-02-29-13-45-07.json".into(),
            kind: FileKind::Json,
        }
    );
    let (_, kind, bytes) = &h.sink.files[0];
    assert_eq!(*kind, FileKind::Json);
    let value: serde_json::Value = serde_json::from_slice(bytes).unwrap();
    assert_eq!(value, to_arguebuf(h.store.graph()));

    // What we export, we can load again.
    let loaded = from_arguebuf(&value).unwrap();
    assert_eq!(loaded.meta(), h.store.graph().meta());
}

#[test]
fn aif_export_uses_alternate_format() {
    let mut h = Harness::new(InspectorConfig::default());
    h.perform(InspectorAction::Export(ExportFormat::Aif)).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&h.sink.files[0].2).unwrap();
    assert!(value["nodes"].is_array());
    assert!(value["locutions"].is_array());
}

#[test]
fn export_reflects_saved_edits_only() {
    let mut h = Harness::new(InspectorConfig::default());
    let claim = ElementId::intern("claim");
    let event = h.store.select(claim).unwrap();
    h.inspector.handle_event(&h.store, event).unwrap();
    h.inspector
        .edit(
            &mut h.store,
            &PropertyPath::parse("text").unwrap(),
            "Saved claim".into(),
        )
        .unwrap();
    h.inspector.save(&mut h.store).unwrap();
    let event = h.store.unselect().unwrap();
    h.inspector.handle_event(&h.store, event).unwrap();

    h.perform(InspectorAction::Export(ExportFormat::Arguebuf))
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&h.sink.files[0].2).unwrap();
    assert_eq!(value["nodes"]["claim"]["atom"]["text"], "Saved claim");
}

// ─── Render ─────────────────────────────────────────────────────────────

#[test]
fn render_presets_reach_the_rasterizer() {
    let dark = InspectorConfig {
        dark_mode: true,
        ..InspectorConfig::default()
    };
    let mut h = Harness::new(dark.clone());

    let outcome = h
        .perform(InspectorAction::Render(RenderPreset::JpgBackground))
        .unwrap();
    h.perform(InspectorAction::Render(RenderPreset::PngTransparent))
        .unwrap();

    assert_eq!(
        outcome,
        ActionOutcome::Delivered {
            filename: "2024-02-29-13-45-07.jpg".into(),
            kind: FileKind::Jpg,
        }
    );
    let formats: Vec<_> = h.rasterizer.requests.iter().map(|o| o.format).collect();
    assert_eq!(formats, [RasterFormat::Jpg, RasterFormat::Png]);
    assert_eq!(
        h.rasterizer.requests[0].background,
        Background::Color(dark.dark_background)
    );
    assert_eq!(h.rasterizer.requests[1].background, Background::Transparent);
    assert_eq!(h.sink.files[1].0, "2024-02-29-13-45-07.png");
}

#[test]
fn delivery_failures_are_reported() {
    let mut h = Harness::new(InspectorConfig::default());
    h.sink.fail = true;
    let err = h
        .perform(InspectorAction::Export(ExportFormat::Aif))
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Export(ExportError::Deliver { .. })
    ));
}

// ─── Reset ──────────────────────────────────────────────────────────────

#[test]
fn reset_replaces_graph_without_delivering() {
    let mut h = Harness::new(InspectorConfig::default());
    let outcome = h
        .perform(InspectorAction::ResetGraph(GraphPreset::Empty))
        .unwrap();

    assert_eq!(outcome, ActionOutcome::GraphReset(GraphPreset::Empty));
    assert!(h.sink.files.is_empty());
    assert_eq!(h.store.export_state().meta().node_count, 0);

    h.perform(InspectorAction::ResetGraph(GraphPreset::Demo))
        .unwrap();
    assert_eq!(h.store.export_state().meta(), ArgGraph::demo().meta());
}

#[test]
fn actions_panel_lists_what_perform_accepts() {
    let mut h = Harness::new(InspectorConfig::default());
    let actions: Vec<InspectorAction> = match h.inspector.panel(&h.store) {
        Panel::Actions { groups, .. } => groups
            .iter()
            .flat_map(|g| g.actions.iter().map(|b| b.action))
            .collect(),
        other => panic!("expected actions, got {other:?}"),
    };
    assert_eq!(actions.len(), 7);

    for action in actions {
        h.perform(action).unwrap();
    }
    // Two resets, five files.
    assert_eq!(h.sink.files.len(), 5);
}

#[test]
fn actions_parse_from_host_json() {
    let action: InspectorAction =
        serde_json::from_str(r#"{"action":"Render","option":"PngBackground"}"#).unwrap();
    assert_eq!(action, InspectorAction::Render(RenderPreset::PngBackground));
    assert!(!action.requires_confirmation());
}
