//! Graph-level actions offered when nothing is selected.
//!
//! Reset replaces the graph; export and render hand bytes to a `FileSink`
//! under a timestamped filename. The format conversions and the rasterizer
//! sit behind traits so hosts can plug in their own.

use crate::config::InspectorConfig;
use crate::store::GraphPreset;
use ab_core::{ArgGraph, Color, FileKind, Timestamp, export_filename, to_aif, to_arguebuf};
use serde::{Deserialize, Serialize};

// ─── Actions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Arguebuf,
    Aif,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderPreset {
    PngTransparent,
    PngBackground,
    JpgBackground,
}

/// Everything the no-selection panel can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "option")]
pub enum InspectorAction {
    ResetGraph(GraphPreset),
    Export(ExportFormat),
    Render(RenderPreset),
}

impl InspectorAction {
    pub fn label(self) -> &'static str {
        match self {
            InspectorAction::ResetGraph(GraphPreset::Empty) => "Empty Graph",
            InspectorAction::ResetGraph(GraphPreset::Demo) => "Demo Graph",
            InspectorAction::Export(ExportFormat::Arguebuf) => "Arguebuf",
            InspectorAction::Export(ExportFormat::Aif) => "AIF",
            InspectorAction::Render(RenderPreset::PngTransparent) => "PNG (Transparent)",
            InspectorAction::Render(RenderPreset::PngBackground) => "PNG (Background)",
            InspectorAction::Render(RenderPreset::JpgBackground) => "JPG (Background)",
        }
    }

    /// Destructive actions the host must confirm before performing.
    pub fn requires_confirmation(self) -> bool {
        matches!(self, InspectorAction::ResetGraph(_))
    }
}

/// A titled group of buttons in the no-selection panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionGroup {
    pub title: &'static str,
    pub actions: Vec<ActionButton>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionButton {
    pub label: &'static str,
    pub action: InspectorAction,
    pub destructive: bool,
}

impl From<InspectorAction> for ActionButton {
    fn from(action: InspectorAction) -> Self {
        Self {
            label: action.label(),
            action,
            destructive: action.requires_confirmation(),
        }
    }
}

/// The three groups, in panel order: replace, export, render.
pub fn action_menu() -> Vec<ActionGroup> {
    let group = |title: &'static str, actions: &[InspectorAction]| ActionGroup {
        title,
        actions: actions.iter().copied().map(ActionButton::from).collect(),
    };
    vec![
        group(
            "Replace with",
            &[
                InspectorAction::ResetGraph(GraphPreset::Empty),
                InspectorAction::ResetGraph(GraphPreset::Demo),
            ],
        ),
        group(
            "Export",
            &[
                InspectorAction::Export(ExportFormat::Arguebuf),
                InspectorAction::Export(ExportFormat::Aif),
            ],
        ),
        group(
            "Render",
            &[
                InspectorAction::Render(RenderPreset::PngTransparent),
                InspectorAction::Render(RenderPreset::PngBackground),
                InspectorAction::Render(RenderPreset::JpgBackground),
            ],
        ),
    ]
}

// ─── Raster options ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    Png,
    Jpg,
}

impl RasterFormat {
    pub fn file_kind(self) -> FileKind {
        match self {
            RasterFormat::Png => FileKind::Png,
            RasterFormat::Jpg => FileKind::Jpg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Background {
    Transparent,
    Color(Color),
}

/// Options handed to a `Rasterizer`. Always renders the full graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterOptions {
    pub format: RasterFormat,
    pub background: Background,
    pub scale: f32,
    /// Only meaningful for JPG.
    pub quality: Option<f32>,
}

impl RenderPreset {
    pub fn options(self, config: &InspectorConfig) -> RasterOptions {
        let (format, background) = match self {
            RenderPreset::PngTransparent => (RasterFormat::Png, Background::Transparent),
            RenderPreset::PngBackground => {
                (RasterFormat::Png, Background::Color(config.background()))
            }
            RenderPreset::JpgBackground => {
                (RasterFormat::Jpg, Background::Color(config.background()))
            }
        };
        RasterOptions {
            format,
            background,
            scale: config.raster_scale,
            quality: (format == RasterFormat::Jpg).then_some(config.jpg_quality),
        }
    }
}

// ─── Bridges ─────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("could not encode export: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("rasterizer failed: {0}")]
    Rasterize(String),

    #[error("could not deliver `{filename}`: {reason}")]
    Deliver { filename: String, reason: String },
}

/// Graph → exchange format conversions.
pub trait ExportBridge {
    /// Native exchange format, ready to write to a file.
    fn graph_to_exchange_format(&self, graph: &ArgGraph) -> Result<Vec<u8>, ExportError>;

    /// Alternate interchange format as a JSON value.
    fn graph_to_alternate_format(&self, graph: &ArgGraph) -> serde_json::Value;
}

/// Arguebuf JSON as the exchange format, AIF as the alternate.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExport;

impl ExportBridge for JsonExport {
    fn graph_to_exchange_format(&self, graph: &ArgGraph) -> Result<Vec<u8>, ExportError> {
        Ok(serde_json::to_vec(&to_arguebuf(graph))?)
    }

    fn graph_to_alternate_format(&self, graph: &ArgGraph) -> serde_json::Value {
        to_aif(graph)
    }
}

/// Produces an image of the whole graph.
pub trait Rasterizer {
    fn rasterize(&mut self, options: &RasterOptions) -> Result<Vec<u8>, ExportError>;
}

/// Hands a generated file to the user (browser download, disk, ...).
pub trait FileSink {
    fn deliver(&mut self, filename: &str, kind: FileKind, bytes: &[u8])
    -> Result<(), ExportError>;
}

/// The collaborators an action may call, plus the time used for filenames.
pub struct ActionContext<'a> {
    pub export: &'a dyn ExportBridge,
    pub rasterizer: &'a mut dyn Rasterizer,
    pub sink: &'a mut dyn FileSink,
    pub now: Timestamp,
}

/// What performing an action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    GraphReset(GraphPreset),
    Delivered { filename: String, kind: FileKind },
}

/// Run an action against `graph`. Export and render files go to the sink;
/// a reset is only reported, the caller applies it to its store.
pub(crate) fn run_action(
    graph: &ArgGraph,
    action: InspectorAction,
    config: &InspectorConfig,
    ctx: &mut ActionContext<'_>,
) -> Result<ActionOutcome, ExportError> {
    let (kind, bytes) = match action {
        InspectorAction::Export(ExportFormat::Arguebuf) => {
            (FileKind::Json, ctx.export.graph_to_exchange_format(graph)?)
        }
        InspectorAction::Export(ExportFormat::Aif) => (
            FileKind::Json,
            serde_json::to_vec(&ctx.export.graph_to_alternate_format(graph))?,
        ),
        InspectorAction::Render(preset) => {
            let options = preset.options(config);
            (options.format.file_kind(), ctx.rasterizer.rasterize(&options)?)
        }
        InspectorAction::ResetGraph(preset) => return Ok(ActionOutcome::GraphReset(preset)),
    };

    let filename = export_filename(&ctx.now, kind);
    ctx.sink.deliver(&filename, kind, &bytes)?;
    log::debug!("delivered {filename} ({} bytes)", bytes.len());
    Ok(ActionOutcome::Delivered { filename, kind })
}

// ─── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn menu_lists_all_actions_in_order() {
        let menu = action_menu();
        let titles: Vec<_> = menu.iter().map(|g| g.title).collect();
        assert_eq!(titles, ["Replace with", "Export", "Render"]);
        let labels: Vec<_> = menu[2].actions.iter().map(|b| b.label).collect();
        assert_eq!(
            labels,
            ["PNG (Transparent)", "PNG (Background)", "JPG (Background)"]
        );
        assert!(menu[0].actions.iter().all(|b| b.destructive));
        assert!(!menu[1].actions.iter().any(|b| b.destructive));
    }

    #[test]
    fn render_presets_follow_config() {
        let mut config = InspectorConfig::default();
        config.dark_mode = true;

        let png = RenderPreset::PngTransparent.options(&config);
        assert_eq!(png.background, Background::Transparent);
        assert_eq!(png.scale, 2.0);
        assert_eq!(png.quality, None);

        let jpg = RenderPreset::JpgBackground.options(&config);
        assert_eq!(jpg.format, RasterFormat::Jpg);
        assert_eq!(jpg.background, Background::Color(config.dark_background));
        assert_eq!(jpg.quality, Some(1.0));
    }

    #[test]
    fn json_export_produces_both_formats() {
        let graph = ArgGraph::demo();
        let bytes = JsonExport.graph_to_exchange_format(&graph).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, to_arguebuf(&graph));
        assert_eq!(JsonExport.graph_to_alternate_format(&graph), to_aif(&graph));
    }
}
