use quitus_types::Color;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StampConfig {
    /// Edge length of the square raster, in pixels.
    pub size_px: u32,
    /// Ink color of rings and text.
    pub color: Color,
    /// Angular advance per arc glyph as a fraction of the font size.
    pub arc_spacing: f32,
    /// Largest angle either arc run may cover, in degrees.
    pub max_arc_sweep_deg: f32,
    pub title_max_chars: usize,
    pub address_max_chars: usize,
    /// Title used when the profile names none.
    pub default_title: String,
    /// Family looked up among the system fonts.
    pub font_family: String,
    /// Font file used instead of the system lookup.
    pub font_path: Option<PathBuf>,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            size_px: 360,
            color: Color::STAMP_BLUE,
            arc_spacing: 0.62,
            max_arc_sweep_deg: 160.0,
            title_max_chars: 18,
            address_max_chars: 28,
            default_title: "LA DIRECTION".to_string(),
            font_family: "DejaVu Sans".to_string(),
            font_path: None,
        }
    }
}
