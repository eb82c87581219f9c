use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Block has a height of {0:.2} which exceeds the total page content height of {1:.2}.")]
    ElementTooLarge(f32, f32),
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

pub mod algorithms;
pub mod config;
pub mod elements;
pub mod engine;
pub mod fonts;
pub mod number;
pub mod text;

pub use self::config::LayoutConfig;
pub use self::elements::{ImageElement, LayoutElement, PositionedElement, RectElement, RuleElement, TextElement};
pub use self::engine::{LayoutEngine, allocate_box, paragraph, split_two_column, text_line};
pub use self::fonts::{FontSpec, StandardFont};
pub use self::number::format_amount;
pub use self::text::{LEADING_FACTOR, TextAlign, fit_to_width, measure_wrapped_height, wrap_lines};

// Re-export geometry types used by callers to prevent type mismatches
pub use quitus_types::geometry::{Margins, Rect, Size};
