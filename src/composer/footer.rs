//! Footer band: call-to-action text and, when available, the QR code.

use super::style::*;
use quitus_layout::{
    ImageElement, LayoutConfig, LayoutElement, PositionedElement, RuleElement, TextAlign, measure_wrapped_height,
    paragraph, text_line,
};
use quitus_types::Rect;

/// Geometry of the footer band, identical on every page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FooterLayout {
    pub band: Rect,
    /// Area available to the call-to-action text.
    pub text_region: Rect,
    /// Square occupied by the QR code, when one is embedded.
    pub qr: Option<Rect>,
}

impl FooterLayout {
    /// Without a QR code the text takes the whole inner band.
    pub(crate) fn new(config: &LayoutConfig, with_qr: bool) -> Self {
        let margins = config.margins;
        let band = Rect::new(
            margins.left,
            config.page_size.height - margins.bottom - FOOTER_HEIGHT,
            config.content_width(),
            FOOTER_HEIGHT,
        );
        let inner = band.inset(FOOTER_PADDING);
        if !with_qr {
            return Self {
                band,
                text_region: inner,
                qr: None,
            };
        }
        let side = inner.height;
        let qr = Rect::new(inner.right() - side, inner.y, side, side);
        let text_region = Rect::new(
            inner.x,
            inner.y,
            (inner.width - side - 2.0 * FOOTER_PADDING).max(0.0),
            inner.height,
        );
        Self {
            band,
            text_region,
            qr: Some(qr),
        }
    }

    /// Elements drawn on each page: a separator rule, the wrapped text
    /// centered vertically, and the QR image.
    pub(crate) fn elements(&self, text: &str) -> Vec<PositionedElement> {
        let mut elements = vec![PositionedElement::new(
            Rect::new(self.band.x, self.band.y, self.band.width, 0.0),
            LayoutElement::Rule(RuleElement {
                color: RULE,
                line_width: 0.5,
            }),
        )];

        let region = self.text_region;
        let text_height = measure_wrapped_height(text, region.width, &SMALL);
        let y = region.y + ((region.height - text_height) / 2.0).max(0.0);
        elements.extend(paragraph(region.x, y, region.width, text, SMALL, MUTED));

        if let Some(qr) = self.qr {
            elements.push(PositionedElement::new(
                qr,
                LayoutElement::Image(ImageElement {
                    key: QR_KEY.to_string(),
                }),
            ));
        }
        elements
    }
}

/// "Page i / n", centered in the bottom margin.
pub(crate) fn page_number(config: &LayoutConfig, index: usize, count: usize) -> PositionedElement {
    let y = config.page_size.height - config.margins.bottom + (config.margins.bottom - SMALL.line_height()) / 2.0;
    let line = Rect::new(config.margins.left, y, config.content_width(), SMALL.line_height());
    text_line(line, &format!("Page {} / {}", index + 1, count), SMALL, MUTED, TextAlign::Center)
}
