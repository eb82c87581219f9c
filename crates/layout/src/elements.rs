use crate::fonts::FontSpec;
use quitus_types::{Color, Rect};

/// An element with its final position on a page. `x`/`y` is the top-left
/// corner in page space (y grows downwards).
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
}

impl PositionedElement {
    pub fn new(rect: Rect, element: LayoutElement) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            element,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Rectangle(RectElement),
    Rule(RuleElement),
    Image(ImageElement),
}

/// One line of text. The element box is the line box: its height is the
/// font's line height and the text starts at its left edge.
#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub font: FontSpec,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RectElement {
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    pub line_width: f32,
}

impl RectElement {
    pub fn outlined(color: Color) -> Self {
        Self {
            stroke: Some(color),
            fill: None,
            line_width: 0.75,
        }
    }

    pub fn filled(fill: Color, stroke: Option<Color>) -> Self {
        Self {
            stroke,
            fill: Some(fill),
            line_width: 0.75,
        }
    }
}

/// A horizontal line along the top edge of the element box.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleElement {
    pub color: Color,
    pub line_width: f32,
}

/// A raster drawn to fill the element box, looked up by resource key.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageElement {
    pub key: String,
}
