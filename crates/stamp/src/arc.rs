//! Placement of text along a circular arc.

use crate::transform::{Affine, TransformStack};
use std::f32::consts::PI;

/// Which way the run reads around the circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcSide {
    /// Centered on 12 o'clock, reading clockwise, glyph tops facing outwards.
    Top,
    /// Centered on 6 o'clock, reading counter-clockwise so the text stays
    /// upright, glyph tops facing the center.
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub center: (f32, f32),
    /// Distance from the center to the middle of the glyphs.
    pub radius: f32,
    pub font_size: f32,
    /// Angular advance per glyph as a fraction of the font size.
    pub spacing: f32,
    /// Largest angle the whole run may cover, in degrees.
    pub max_sweep_deg: f32,
    pub side: ArcSide,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    pub ch: char,
    /// Angle from 12 o'clock, clockwise, in radians.
    pub angle: f32,
    /// Maps the glyph's local frame (origin at the glyph center) to raster
    /// space.
    pub transform: Affine,
}

impl ArcParams {
    /// Angular step between glyph centers for a run of `count` glyphs.
    pub fn step(&self, count: usize) -> f32 {
        if count == 0 || self.radius <= 0.0 {
            return 0.0;
        }
        let natural = self.spacing * self.font_size / self.radius;
        let max_sweep = self.max_sweep_deg.max(0.0).to_radians();
        if natural * count as f32 > max_sweep {
            max_sweep / count as f32
        } else {
            natural
        }
    }
}

/// Computes one transform per character of `text`, centered on the arc's
/// reference angle.
pub fn plan_arc(text: &str, params: &ArcParams) -> Vec<GlyphPlacement> {
    let chars: Vec<char> = text.chars().collect();
    let count = chars.len();
    if count == 0 {
        return Vec::new();
    }

    let step = params.step(count);
    let half_sweep = count as f32 * step / 2.0;
    let (start, direction, reference) = match params.side {
        ArcSide::Top => (-half_sweep, 1.0, 0.0),
        ArcSide::Bottom => (PI + half_sweep, -1.0, PI),
    };
    debug_assert!((start + direction * half_sweep - reference).abs() < 1e-4);

    let mut stack = TransformStack::new();
    chars
        .into_iter()
        .enumerate()
        .map(|(i, ch)| {
            let angle = start + direction * (i as f32 + 0.5) * step;
            stack.scoped(|s| {
                s.translate(params.center.0, params.center.1);
                s.rotate(angle);
                s.translate(0.0, -params.radius);
                if params.side == ArcSide::Bottom {
                    s.rotate(PI);
                }
                GlyphPlacement {
                    ch,
                    angle,
                    transform: s.current(),
                }
            })
        })
        .collect()
}
