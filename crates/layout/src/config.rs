use crate::LayoutError;
use quitus_types::geometry::{Margins, Size};
use serde::{Deserialize, Serialize};

/// Page geometry shared by every document the engine lays out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Page size in points. Defaults to A4 portrait.
    pub page_size: Size,
    /// Blank border around the content area. Defaults to 40pt on every side.
    pub margins: Margins,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_size: Size::a4(),
            margins: Margins::default(),
        }
    }
}

impl LayoutConfig {
    pub fn content_width(&self) -> f32 {
        self.page_size.width - self.margins.left - self.margins.right
    }

    pub fn content_height(&self) -> f32 {
        self.page_size.height - self.margins.top - self.margins.bottom
    }

    /// Rejects geometry that leaves no content area.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let values = [
            self.page_size.width,
            self.page_size.height,
            self.margins.top,
            self.margins.right,
            self.margins.bottom,
            self.margins.left,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(LayoutError::InvalidGeometry(
                "page size and margins must be finite and non-negative".into(),
            ));
        }
        if self.content_width() <= 0.0 || self.content_height() <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "margins leave no content area on a {}x{} page",
                self.page_size.width, self.page_size.height
            )));
        }
        Ok(())
    }
}
