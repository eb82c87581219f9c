//! Top-down block flow with page breaking.

use crate::algorithms::pagination::check_block_fit;
use crate::config::LayoutConfig;
use crate::elements::{LayoutElement, PositionedElement, TextElement};
use crate::fonts::FontSpec;
use crate::text::{TextAlign, wrap_lines};
use crate::LayoutError;
use quitus_types::geometry::EPSILON;
use quitus_types::{Color, Rect};

/// Positions blocks one below the other, starting a new page whenever the
/// next atomic block does not fit in what is left of the current one.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
    pages: Vec<Vec<PositionedElement>>,
    cursor_y: f32,
    bottom_reserve: f32,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self {
            config,
            pages: vec![Vec::new()],
            cursor_y: config.margins.top,
            bottom_reserve: 0.0,
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Withholds `height` points above the bottom margin on every page.
    pub fn reserve_bottom(&mut self, height: f32) -> Result<(), LayoutError> {
        if !height.is_finite() || height < 0.0 || height >= self.config.content_height() {
            return Err(LayoutError::InvalidGeometry(format!(
                "bottom reserve of {:.2} does not fit a content height of {:.2}",
                height,
                self.config.content_height()
            )));
        }
        self.bottom_reserve = height;
        Ok(())
    }

    pub fn content_left(&self) -> f32 {
        self.config.margins.left
    }

    pub fn content_width(&self) -> f32 {
        self.config.content_width()
    }

    pub fn content_top(&self) -> f32 {
        self.config.margins.top
    }

    /// Lowest Y flowed content may reach.
    pub fn content_bottom(&self) -> f32 {
        self.config.page_size.height - self.config.margins.bottom - self.bottom_reserve
    }

    /// Height available to flowed content on a fresh page.
    pub fn page_content_height(&self) -> f32 {
        self.content_bottom() - self.content_top()
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    pub fn remaining_height(&self) -> f32 {
        (self.content_bottom() - self.cursor_y).max(0.0)
    }

    /// Zero-based index of the page being filled.
    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn fits(&self, height: f32) -> bool {
        !check_block_fit(self.cursor_y, height, self.content_bottom()).should_break
    }

    /// Starts a new page and moves the cursor to the top margin.
    pub fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor_y = self.content_top();
        log::debug!("Started page {}", self.pages.len());
    }

    /// Reserves a full-width block of `height` and advances the cursor past
    /// it, breaking to a new page first when it does not fit.
    pub fn place_block(&mut self, height: f32) -> Result<Rect, LayoutError> {
        if !height.is_finite() || height < 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "block height must be finite and non-negative, got {}",
                height
            )));
        }
        let page_height = self.page_content_height();
        if height > page_height + EPSILON {
            return Err(LayoutError::ElementTooLarge(height, page_height));
        }
        if !self.fits(height) {
            self.new_page();
        }
        let (rect, next_y) = allocate_box(self.content_left(), self.cursor_y, self.content_width(), height)?;
        self.cursor_y = next_y;
        Ok(rect)
    }

    /// Adds vertical spacing. Spacing never carries over to a new page.
    pub fn skip(&mut self, dy: f32) {
        if dy > 0.0 {
            self.cursor_y = (self.cursor_y + dy).min(self.content_bottom());
        }
    }

    /// Adds an element to the page being filled.
    pub fn push(&mut self, element: PositionedElement) {
        if let Some(page) = self.pages.last_mut() {
            page.push(element);
        }
    }

    pub fn extend(&mut self, elements: impl IntoIterator<Item = PositionedElement>) {
        if let Some(page) = self.pages.last_mut() {
            page.extend(elements);
        }
    }

    /// Adds an element to an already started page.
    pub fn push_to_page(&mut self, page_index: usize, element: PositionedElement) {
        if let Some(page) = self.pages.get_mut(page_index) {
            page.push(element);
        }
    }

    pub fn into_pages(self) -> Vec<Vec<PositionedElement>> {
        self.pages
    }
}

/// Allocates a box at `(x, y)` and returns it with the cursor position just
/// below it.
pub fn allocate_box(x: f32, y: f32, width: f32, min_height: f32) -> Result<(Rect, f32), LayoutError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(LayoutError::InvalidGeometry(format!(
            "box origin must be finite, got ({}, {})",
            x, y
        )));
    }
    if !width.is_finite() || !min_height.is_finite() || width < 0.0 || min_height < 0.0 {
        return Err(LayoutError::InvalidGeometry(format!(
            "box size must be finite and non-negative, got {}x{}",
            width, min_height
        )));
    }
    let rect = Rect::new(x, y, width, min_height);
    Ok((rect, rect.bottom()))
}

/// Width of each of two equal columns separated by `gap`.
pub fn split_two_column(total_width: f32, gap: f32) -> Result<f32, LayoutError> {
    if !total_width.is_finite() || !gap.is_finite() || total_width < 0.0 || gap < 0.0 {
        return Err(LayoutError::InvalidGeometry(format!(
            "cannot split width {} with gap {}",
            total_width, gap
        )));
    }
    if gap > total_width {
        return Err(LayoutError::InvalidGeometry(format!(
            "gap {} is wider than the available width {}",
            gap, total_width
        )));
    }
    Ok((total_width - gap) / 2.0)
}

/// A single text line aligned horizontally inside `rect`, at its top.
pub fn text_line(rect: Rect, text: &str, font: FontSpec, color: Color, align: TextAlign) -> PositionedElement {
    let width = font.text_width(text);
    let x = match align {
        TextAlign::Left => rect.x,
        TextAlign::Center => rect.x + (rect.width - width) / 2.0,
        TextAlign::Right => rect.right() - width,
    };
    PositionedElement {
        x,
        y: rect.y,
        width,
        height: font.line_height(),
        element: LayoutElement::Text(TextElement {
            content: text.to_string(),
            font,
            color,
        }),
    }
}

/// One left-aligned text element per wrapped line, stacked from `y`.
pub fn paragraph(x: f32, y: f32, width: f32, text: &str, font: FontSpec, color: Color) -> Vec<PositionedElement> {
    let line_height = font.line_height();
    wrap_lines(text, width, &font)
        .into_iter()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| {
            let rect = Rect::new(x, y + i as f32 * line_height, width, line_height);
            text_line(rect, &line, font, color, TextAlign::Left)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quitus_types::{Margins, Size};

    fn small_page() -> LayoutConfig {
        LayoutConfig {
            page_size: Size::new(200.0, 300.0),
            margins: Margins::all(20.0),
        }
    }

    #[test]
    fn blocks_flow_top_down() {
        let mut engine = LayoutEngine::new(small_page()).unwrap();
        let a = engine.place_block(50.0).unwrap();
        let b = engine.place_block(30.0).unwrap();
        assert_eq!(a, Rect::new(20.0, 20.0, 160.0, 50.0));
        assert_eq!(b.y, 70.0);
        assert_eq!(engine.cursor_y(), 100.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn block_that_does_not_fit_starts_a_new_page() {
        let mut engine = LayoutEngine::new(small_page()).unwrap();
        engine.place_block(200.0).unwrap();
        assert_eq!(engine.remaining_height(), 60.0);
        let rect = engine.place_block(61.0).unwrap();
        assert_eq!(engine.page_count(), 2);
        assert_eq!(rect.y, 20.0);
    }

    #[test]
    fn exact_fit_stays_on_the_page() {
        let mut engine = LayoutEngine::new(small_page()).unwrap();
        engine.place_block(200.0).unwrap();
        engine.place_block(60.0).unwrap();
        assert_eq!(engine.page_count(), 1);
    }

    #[test]
    fn block_taller_than_a_page_is_an_error() {
        let mut engine = LayoutEngine::new(small_page()).unwrap();
        let err = engine.place_block(261.0).unwrap_err();
        assert!(matches!(err, LayoutError::ElementTooLarge(h, page) if h == 261.0 && page == 260.0));
    }

    #[test]
    fn bottom_reserve_shrinks_every_page() {
        let mut engine = LayoutEngine::new(small_page()).unwrap();
        engine.reserve_bottom(60.0).unwrap();
        assert_eq!(engine.page_content_height(), 200.0);
        engine.place_block(150.0).unwrap();
        engine.place_block(60.0).unwrap();
        assert_eq!(engine.page_count(), 2);
        assert!(engine.reserve_bottom(500.0).is_err());
    }

    #[test]
    fn skip_is_clamped_to_the_content_bottom() {
        let mut engine = LayoutEngine::new(small_page()).unwrap();
        engine.skip(1000.0);
        assert_eq!(engine.cursor_y(), 280.0);
        assert_eq!(engine.remaining_height(), 0.0);
    }

    #[test]
    fn allocate_box_rejects_bad_input() {
        assert!(allocate_box(0.0, 0.0, -1.0, 10.0).is_err());
        assert!(allocate_box(0.0, f32::NAN, 10.0, 10.0).is_err());
        assert!(allocate_box(0.0, 0.0, 10.0, f32::INFINITY).is_err());
        let (rect, next) = allocate_box(5.0, 10.0, 100.0, 0.0).unwrap();
        assert_eq!(rect.height, 0.0);
        assert_eq!(next, 10.0);
    }

    #[test]
    fn two_columns_are_symmetric() {
        let width = split_two_column(515.0, 15.0).unwrap();
        assert_eq!(width, 250.0);
        assert!(split_two_column(10.0, 20.0).is_err());
        assert!(split_two_column(-10.0, 0.0).is_err());
    }

    #[test]
    fn text_line_alignment() {
        let rect = Rect::new(100.0, 50.0, 200.0, 20.0);
        let font = FontSpec::regular(10.0);
        let w = font.text_width("Total");
        let left = text_line(rect, "Total", font, Color::BLACK, TextAlign::Left);
        let center = text_line(rect, "Total", font, Color::BLACK, TextAlign::Center);
        let right = text_line(rect, "Total", font, Color::BLACK, TextAlign::Right);
        assert_eq!(left.x, 100.0);
        assert!((center.x - (200.0 - w / 2.0)).abs() < 0.001);
        assert!((right.x + right.width - 300.0).abs() < 0.001);
    }

    #[test]
    fn paragraph_stacks_lines() {
        let font = FontSpec::regular(10.0);
        let lines = paragraph(0.0, 100.0, 60.0, "un deux trois quatre cinq six", font, Color::BLACK);
        assert!(lines.len() > 1);
        for (i, line) in lines.iter().enumerate() {
            assert!((line.y - (100.0 + i as f32 * 12.0)).abs() < 0.001);
        }
    }
}
