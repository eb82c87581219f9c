use quitus_layout::LayoutError;
use quitus_render_lopdf::RenderError;
use thiserror::Error;

/// Why a document could not be produced. Stamp and QR problems never show up
/// here: they degrade the output instead.
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),
}

impl ComposeError {
    /// Name of the stage that could not recover.
    pub fn stage(&self) -> &'static str {
        match self {
            ComposeError::Layout(_) => "layout",
            ComposeError::Render(_) => "render",
        }
    }
}
