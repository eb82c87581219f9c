//! PDF writer using lopdf.
//!
//! Turns pages of positioned elements into a PDF byte buffer. Text uses the
//! non-embedded standard fonts `Helvetica` and `Helvetica-Bold` with
//! WinAnsi encoding; rasters are embedded as Flate-compressed image
//! XObjects.

mod error;
mod helpers;
mod images;
mod renderer;

pub use error::RenderError;
pub use helpers::to_win_ansi;
pub use images::validate_image;
pub use renderer::{DocumentInfo, LopdfRenderer};
