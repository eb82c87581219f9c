//! Glyph metrics for the PDF standard fonts used by the document templates.
//!
//! The renderer references `Helvetica` and `Helvetica-Bold` without embedding
//! them, so text is measured against the published AFM advance widths. Widths
//! are expressed in 1/1000 em.

use serde::{Deserialize, Serialize};

/// Width used for any glyph not covered by the tables.
const DEFAULT_WIDTH: u16 = 556;

/// Advance widths of `Helvetica` for U+0020..=U+007E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Advance widths of `Helvetica-Bold` for U+0020..=U+007E.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    /// The PostScript name written as `BaseFont` in the PDF.
    pub fn postscript_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    fn table(&self) -> &'static [u16; 95] {
        match self {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Advance width of `ch` in 1/1000 em.
    pub fn char_width(&self, ch: char) -> u16 {
        let ch = fold_accent(ch);
        let code = ch as u32;
        if (0x20..=0x7e).contains(&code) {
            return self.table()[(code - 0x20) as usize];
        }
        match ch {
            '\u{a0}' => 278,
            '\u{2014}' | '\u{2026}' => 1000,
            '\u{2013}' => 556,
            '\u{2022}' => 350,
            '\u{2019}' | '\u{2018}' => 222,
            '°' => 400,
            '«' | '»' => 556,
            '€' => 556,
            _ => DEFAULT_WIDTH,
        }
    }
}

/// Maps Latin-1 accented letters onto the unaccented letter sharing their
/// advance width.
fn fold_accent(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'ç' => 'c',
        'Ç' => 'C',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        other => other,
    }
}

/// A standard font at a given point size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub face: StandardFont,
    pub size: f32,
}

impl FontSpec {
    pub const fn regular(size: f32) -> Self {
        Self {
            face: StandardFont::Helvetica,
            size,
        }
    }

    pub const fn bold(size: f32) -> Self {
        Self {
            face: StandardFont::HelveticaBold,
            size,
        }
    }

    pub fn char_width(&self, ch: char) -> f32 {
        self.face.char_width(ch) as f32 * self.size / 1000.0
    }

    /// Width of `text` in points.
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().map(|c| self.char_width(c)).sum()
    }
}
