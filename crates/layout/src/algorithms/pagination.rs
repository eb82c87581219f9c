use quitus_types::geometry::EPSILON;

pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Checks whether a block fits below the cursor.
///
/// * `cursor_y`: The current Y position in page space.
/// * `block_height`: The height the block needs.
/// * `content_bottom`: The lowest Y content may reach on this page.
pub fn check_block_fit(cursor_y: f32, block_height: f32, content_bottom: f32) -> BreakAnalysis {
    let available = (content_bottom - cursor_y).max(0.0);
    BreakAnalysis {
        should_break: block_height > available + EPSILON,
        remaining_height: available,
    }
}
