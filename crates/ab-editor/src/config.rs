//! Inspector configuration.

use ab_core::Color;

/// Settings for the inspector panel and its render actions.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectorConfig {
    /// Pixel ratio passed to the rasterizer. Default: **2.0**.
    pub raster_scale: f32,

    /// JPG encoder quality in `[0.0, 1.0]`. Default: **1.0**.
    pub jpg_quality: f32,

    /// Render background in light mode. Default: `#FFFFFF`.
    pub light_background: Color,

    /// Render background in dark mode. Default: `#121212`.
    pub dark_background: Color,

    /// Whether the host UI is in dark mode. Render backgrounds follow it.
    pub dark_mode: bool,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            raster_scale: 2.0,
            jpg_quality: 1.0,
            light_background: Color::rgb(0xFF, 0xFF, 0xFF),
            dark_background: Color::rgb(0x12, 0x12, 0x12),
            dark_mode: false,
        }
    }
}

impl InspectorConfig {
    /// The theme background used by "with background" renders.
    pub fn background(&self) -> Color {
        if self.dark_mode {
            self.dark_background
        } else {
            self.light_background
        }
    }
}
