use crate::fonts::FontSpec;
use quitus_types::geometry::EPSILON;

/// Greedy line breaking.
///
/// Words are separated by whitespace and packed onto a line while they fit in
/// `max_width`. `'\n'` always starts a new line. A word wider than the whole
/// line is broken between characters; every line receives at least one
/// character, so the loop terminates for any positive or zero width.
pub fn wrap_lines(text: &str, max_width: f32, font: &FontSpec) -> Vec<String> {
    let mut lines = Vec::new();
    let space_width = font.char_width(' ');

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        let mut current_line_width = 0.0f32;

        for word in paragraph.split_whitespace() {
            let word_width = font.text_width(word);
            let gap = if current_line.is_empty() { 0.0 } else { space_width };

            if current_line_width + gap + word_width <= max_width + EPSILON {
                if !current_line.is_empty() {
                    current_line.push(' ');
                }
                current_line.push_str(word);
                current_line_width += gap + word_width;
                continue;
            }

            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
                current_line_width = 0.0;
            }

            if word_width <= max_width + EPSILON {
                current_line.push_str(word);
                current_line_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let char_width = font.char_width(ch);
                if current_line_width + char_width > max_width + EPSILON && !current_line.is_empty() {
                    lines.push(std::mem::take(&mut current_line));
                    current_line_width = 0.0;
                }
                current_line.push(ch);
                current_line_width += char_width;
            }
        }

        lines.push(current_line);
    }

    lines
}
