//! Page drawing context: turns positioned elements into content stream
//! operations.

use crate::RenderError;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use quitus_layout::{ImageElement, LayoutElement, PositionedElement, RectElement, RuleElement, StandardFont, TextElement};
use quitus_types::Color;
use std::collections::HashMap;

/// Resource name of a standard font in the shared font dictionary.
pub(crate) fn font_resource_name(face: StandardFont) -> &'static str {
    match face {
        StandardFont::Helvetica => "F1",
        StandardFont::HelveticaBold => "F2",
    }
}

pub(crate) struct PageContext<'a> {
    page_height: f32,
    content: Content,
    state: PageRenderState,
    image_names: &'a HashMap<String, String>,
}

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<(StandardFont, f32)>,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f32>,
}

impl<'a> PageContext<'a> {
    pub(crate) fn new(page_height: f32, image_names: &'a HashMap<String, String>) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: Default::default(),
            image_names,
        }
    }

    pub(crate) fn finish(self) -> Content {
        self.content
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    pub(crate) fn draw_element(&mut self, el: &PositionedElement) -> Result<(), RenderError> {
        match &el.element {
            LayoutElement::Text(text) => self.draw_text(text, el),
            LayoutElement::Rectangle(rect) => self.draw_rect(rect, el),
            LayoutElement::Rule(rule) => self.draw_rule(rule, el),
            LayoutElement::Image(image) => self.draw_image(image, el),
        }
        Ok(())
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.op("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn set_stroke(&mut self, color: Color, width: f32) {
        if self.state.line_width != Some(width) {
            self.op("w", vec![width.into()]);
            self.state.line_width = Some(width);
        }
        if self.state.stroke_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.op("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke_color = Some(color);
        }
    }

    fn set_font(&mut self, face: StandardFont, size: f32) {
        if self.state.font != Some((face, size)) {
            self.op(
                "Tf",
                vec![Object::Name(font_resource_name(face).as_bytes().to_vec()), size.into()],
            );
            self.state.font = Some((face, size));
        }
    }

    fn draw_rect(&mut self, rect: &RectElement, el: &PositionedElement) {
        let y = self.page_height - (el.y + el.height);
        if let Some(fill) = rect.fill {
            self.set_fill_color(fill);
            self.op("re", vec![el.x.into(), y.into(), el.width.into(), el.height.into()]);
            self.op("f", vec![]);
        }
        if let Some(stroke) = rect.stroke {
            self.set_stroke(stroke, rect.line_width);
            self.op("re", vec![el.x.into(), y.into(), el.width.into(), el.height.into()]);
            self.op("S", vec![]);
        }
    }

    fn draw_rule(&mut self, rule: &RuleElement, el: &PositionedElement) {
        self.set_stroke(rule.color, rule.line_width);
        let line_y = self.page_height - el.y;
        self.op("m", vec![el.x.into(), line_y.into()]);
        self.op("l", vec![(el.x + el.width).into(), line_y.into()]);
        self.op("S", vec![]);
    }

    fn draw_text(&mut self, text: &TextElement, el: &PositionedElement) {
        if text.content.trim().is_empty() {
            return;
        }
        self.op("BT", vec![]);
        self.set_font(text.font.face, text.font.size);
        self.set_fill_color(text.color);
        // Half the leading above, then the ascent.
        let baseline_y = el.y + (el.height - text.font.size) / 2.0 + text.font.size * 0.8;
        let pdf_y = self.page_height - baseline_y;
        self.op("Td", vec![el.x.into(), pdf_y.into()]);
        self.op(
            "Tj",
            vec![Object::String(to_win_ansi(&text.content), StringFormat::Literal)],
        );
        self.op("ET", vec![]);
    }

    fn draw_image(&mut self, image: &ImageElement, el: &PositionedElement) {
        let Some(name) = self.image_names.get(&image.key) else {
            log::warn!("Image resource '{}' was not provided; leaving its box empty", image.key);
            return;
        };
        let name = name.clone();
        let y = self.page_height - (el.y + el.height);
        self.op("q", vec![]);
        self.op(
            "cm",
            vec![el.width.into(), 0.into(), 0.into(), el.height.into(), el.x.into(), y.into()],
        );
        self.op("Do", vec![Object::Name(name.into_bytes())]);
        self.op("Q", vec![]);
    }
}

/// Encodes text for a WinAnsi (Windows-1252) font. Characters outside the
/// encoding become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            'Œ' => 0x8c,
            'œ' => 0x9c,
            '\u{80}'..='\u{9f}' => b'?',
            c if (c as u32) <= 0xff => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quitus_layout::FontSpec;

    #[test]
    fn win_ansi_maps_latin1_and_typographic_punctuation() {
        assert_eq!(to_win_ansi("Reçu"), vec![b'R', b'e', 0xe7, b'u']);
        assert_eq!(to_win_ansi("—•…€"), vec![0x97, 0x95, 0x85, 0x80]);
        assert_eq!(to_win_ansi("日本"), vec![b'?', b'?']);
    }

    #[test]
    fn text_is_drawn_in_pdf_space() {
        let names = HashMap::new();
        let mut ctx = PageContext::new(800.0, &names);
        let el = PositionedElement {
            x: 40.0,
            y: 100.0,
            width: 50.0,
            height: 12.0,
            element: LayoutElement::Text(TextElement {
                content: "Total".into(),
                font: FontSpec::bold(10.0),
                color: Color::BLACK,
            }),
        };
        ctx.draw_element(&el).unwrap();
        let ops = ctx.finish().operations;
        let names: Vec<&str> = ops.iter().map(|o| o.operator.as_str()).collect();
        assert_eq!(names, vec!["BT", "Tf", "rg", "Td", "Tj", "ET"]);
        let td = &ops[3];
        assert_eq!(td.operands[1].as_float().unwrap(), 800.0 - 109.0);
        assert_eq!(ops[1].operands[0].as_name().unwrap(), b"F2");
    }

    #[test]
    fn repeated_state_is_not_re_emitted() {
        let names = HashMap::new();
        let mut ctx = PageContext::new(800.0, &names);
        let rect = PositionedElement {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            element: LayoutElement::Rectangle(RectElement::outlined(Color::BLACK)),
        };
        ctx.draw_element(&rect).unwrap();
        ctx.draw_element(&rect).unwrap();
        let ops = ctx.finish().operations;
        assert_eq!(ops.iter().filter(|o| o.operator == "RG").count(), 1);
        assert_eq!(ops.iter().filter(|o| o.operator == "S").count(), 2);
    }

    #[test]
    fn unknown_image_key_is_skipped() {
        let names = HashMap::new();
        let mut ctx = PageContext::new(800.0, &names);
        let el = PositionedElement {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            element: LayoutElement::Image(ImageElement { key: "qr".into() }),
        };
        ctx.draw_element(&el).unwrap();
        assert!(ctx.finish().operations.is_empty());
    }
}
