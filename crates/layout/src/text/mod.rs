//! Text measurement: greedy word wrap against standard-font metrics.

mod wrapper;

pub use wrapper::wrap_lines;

use crate::fonts::FontSpec;
use serde::{Deserialize, Serialize};

/// Line height as a multiple of the font size.
pub const LEADING_FACTOR: f32 = 1.2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl FontSpec {
    pub fn line_height(&self) -> f32 {
        self.size * LEADING_FACTOR
    }
}

/// Height of `text` once wrapped at `width`.
///
/// Always at least one line, so an empty cell still reserves a text line.
pub fn measure_wrapped_height(text: &str, width: f32, font: &FontSpec) -> f32 {
    let line_count = wrap_lines(text, width, font).len().max(1);
    line_count as f32 * font.line_height()
}

/// Cuts `text` so it fits on one line of `width`, ending with `…` when
/// anything was removed.
pub fn fit_to_width(text: &str, width: f32, font: &FontSpec) -> String {
    let text = text.trim();
    if font.text_width(text) <= width {
        return text.to_string();
    }
    let budget = width - font.char_width('…');
    let mut out = String::new();
    let mut used = 0.0;
    for ch in text.chars() {
        let w = font.char_width(ch);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.truncate(out.trim_end().len());
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fit_to_width_keeps_short_text() {
        let font = FontSpec::bold(11.0);
        assert_eq!(fit_to_width("  Boutique Awa ", 200.0, &font), "Boutique Awa");
    }

    #[test]
    fn fit_to_width_cuts_with_ellipsis() {
        let font = FontSpec::regular(10.0);
        let text = "Etablissements Kone et Freres Import Export Distribution";
        let out = fit_to_width(text, 100.0, &font);
        assert!(out.ends_with('…'));
        assert!(font.text_width(&out) <= 100.0 + 0.001, "{}", out);
        assert!(text.starts_with(out.trim_end_matches('…')));
    }

    #[test]
    fn empty_text_is_one_line_high() {
        let font = FontSpec::regular(10.0);
        assert_eq!(measure_wrapped_height("", 100.0, &font), 12.0);
        assert_eq!(measure_wrapped_height("   ", 100.0, &font), 12.0);
    }

    #[test]
    fn long_designation_grows_by_whole_lines() {
        let font = FontSpec::regular(10.0);
        let text = "Fourniture et pose de carreaux de ceramique grand format pour la terrasse";
        let h = measure_wrapped_height(text, 120.0, &font);
        let lines = wrap_lines(text, 120.0, &font).len();
        assert!(lines > 1);
        assert!((h - lines as f32 * 12.0).abs() < 0.001);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: extending a text never reduces its wrapped height, and
        /// no text measures below one line.
        #[test]
        fn wrapped_height_is_monotonic_in_length(
            text in "[a-zA-Z ]{0,160}",
            width in 5.0f32..300.0f32,
        ) {
            let font = FontSpec::regular(10.0);
            let chars: Vec<char> = text.chars().collect();
            let mut previous = 0.0f32;
            for end in 0..=chars.len() {
                let prefix: String = chars[..end].iter().collect();
                let height = measure_wrapped_height(&prefix, width, &font);
                prop_assert!(height >= font.line_height());
                prop_assert!(height + 0.001 >= previous, "height dropped at prefix {:?}", prefix);
                previous = height;
            }
        }
    }
}
