//! tiny-skia backend: glyph outlines come from `ttf-parser`, the face from
//! `fontdb` (or a configured font file).

use crate::arc::{ArcParams, ArcSide, plan_arc};
use crate::config::StampConfig;
use crate::text::truncate_with_ellipsis;
use crate::transform::Affine;
use crate::{StampBackend, StampError, StampImage, StampOutcome, StampRequest};
use std::sync::{Arc, OnceLock};
use tiny_skia::{FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform};
use ttf_parser::{Face, OutlineBuilder};

/// Raw bytes of the resolved face, loaded once.
#[derive(Debug)]
struct FontData {
    data: Vec<u8>,
    index: u32,
}

pub struct SkiaStampRenderer {
    config: StampConfig,
    font: OnceLock<Option<Arc<FontData>>>,
}

impl SkiaStampRenderer {
    pub fn new(config: StampConfig) -> Self {
        Self {
            config,
            font: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &StampConfig {
        &self.config
    }

    fn font(&self) -> Option<Arc<FontData>> {
        self.font.get_or_init(|| resolve_font(&self.config).map(Arc::new)).clone()
    }

    fn rasterize(&self, request: &StampRequest) -> Result<StampImage, StampError> {
        let font = self
            .font()
            .ok_or_else(|| StampError::FontUnavailable(format!("no face found for '{}'", self.config.font_family)))?;
        let face = Face::parse(&font.data, font.index).map_err(|e| StampError::FontUnavailable(e.to_string()))?;

        let size = self.config.size_px.max(64);
        let mut pixmap = Pixmap::new(size, size).ok_or(StampError::Pixmap(size))?;

        let mut paint = Paint::default();
        let ink = self.config.color;
        paint.set_color_rgba8(ink.r, ink.g, ink.b, 255);
        paint.anti_alias = true;

        let s = size as f32;
        let c = s / 2.0;
        let ring_width = s * 0.012;
        let outer = c - ring_width * 1.5;
        let band = s * 0.16;
        let inner = outer - band;

        stroke_circle(&mut pixmap, c, outer, ring_width, &paint);
        stroke_circle(&mut pixmap, c, inner, ring_width * 0.6, &paint);

        let arc_font = band * 0.5;
        let arc = |side| ArcParams {
            center: (c, c),
            radius: outer - band / 2.0,
            font_size: arc_font,
            spacing: self.config.arc_spacing,
            max_sweep_deg: self.config.max_arc_sweep_deg,
            side,
        };
        if let Some(top) = &request.top_text {
            for glyph in plan_arc(top, &arc(ArcSide::Top)) {
                draw_glyph(&mut pixmap, &face, glyph.ch, arc_font, glyph.transform, &paint);
            }
        }
        if let Some(bottom) = &request.bottom_text {
            for glyph in plan_arc(bottom, &arc(ArcSide::Bottom)) {
                draw_glyph(&mut pixmap, &face, glyph.ch, arc_font, glyph.transform, &paint);
            }
        }

        let logo_drawn = match &request.logo {
            Some(bytes) => {
                let side = inner * 0.55;
                match draw_logo(&mut pixmap, bytes, c - side / 2.0, c - inner * 0.72, side, side) {
                    Ok(()) => true,
                    Err(e) => {
                        log::warn!("Stamp logo could not be decoded, drawing without it: {}", e);
                        false
                    }
                }
            }
            None => false,
        };
        let (title_y, address_y) = if logo_drawn {
            (c + inner * 0.12, c + inner * 0.42)
        } else {
            (c - inner * 0.05, c + inner * 0.3)
        };

        let title = request.title.as_deref().unwrap_or(&self.config.default_title);
        let title = truncate_with_ellipsis(title, self.config.title_max_chars);
        let title_font = fit_font_size(&face, &title, s * 0.065, inner * 1.7);
        draw_centered_line(&mut pixmap, &face, &title, title_font, c, title_y, &paint);

        if let Some(address) = &request.address {
            let address = truncate_with_ellipsis(address, self.config.address_max_chars);
            let address_font = fit_font_size(&face, &address, s * 0.042, inner * 1.6);
            draw_centered_line(&mut pixmap, &face, &address, address_font, c, address_y, &paint);
        }

        let png = pixmap.encode_png().map_err(|e| StampError::Png(e.to_string()))?;
        Ok(StampImage {
            png,
            width_px: size,
            height_px: size,
        })
    }
}

impl StampBackend for SkiaStampRenderer {
    fn is_available(&self) -> bool {
        self.font().is_some()
    }

    fn render(&self, request: &StampRequest) -> StampOutcome {
        match self.rasterize(request) {
            Ok(image) => StampOutcome::Rendered(image),
            Err(e) => {
                log::warn!("Stamp rasterization unavailable: {}", e);
                StampOutcome::Unavailable { reason: e.to_string() }
            }
        }
    }
}

fn resolve_font(config: &StampConfig) -> Option<FontData> {
    if let Some(path) = &config.font_path {
        return match std::fs::read(path) {
            Ok(data) if Face::parse(&data, 0).is_ok() => Some(FontData { data, index: 0 }),
            Ok(_) => {
                log::warn!("Stamp font {} is not a usable font file", path.display());
                None
            }
            Err(e) => {
                log::warn!("Failed to read stamp font {}: {}", path.display(), e);
                None
            }
        };
    }

    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let id = db
        .query(&fontdb::Query {
            families: &[fontdb::Family::Name(&config.font_family), fontdb::Family::SansSerif],
            weight: fontdb::Weight::BOLD,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        })
        .or_else(|| {
            db.query(&fontdb::Query {
                families: &[fontdb::Family::SansSerif],
                weight: fontdb::Weight::NORMAL,
                stretch: fontdb::Stretch::Normal,
                style: fontdb::Style::Normal,
            })
        });
    let Some(id) = id else {
        log::warn!("No system font found for the stamp (looked for '{}')", config.font_family);
        return None;
    };
    let font = db.with_face_data(id, |data, index| FontData {
        data: data.to_vec(),
        index,
    });
    if font.is_some() {
        log::debug!("Resolved stamp font {:?}", db.face(id).map(|f| f.post_script_name.clone()));
    }
    font
}

fn to_skia(m: Affine) -> Transform {
    Transform::from_row(m.sx, m.ky, m.kx, m.sy, m.tx, m.ty)
}

fn stroke_circle(pixmap: &mut Pixmap, center: f32, radius: f32, width: f32, paint: &Paint) {
    if let Some(path) = PathBuilder::from_circle(center, center, radius) {
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, paint, &stroke, Transform::identity(), None);
    }
}

/// Feeds glyph outlines into a tiny-skia path, flipping font units (y up)
/// into raster space (y down) around the glyph center.
struct SkiaOutline {
    builder: PathBuilder,
    scale: f32,
    dx: f32,
    dy: f32,
}

impl SkiaOutline {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale + self.dx, -y * self.scale + self.dy)
    }
}

impl OutlineBuilder for SkiaOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

fn glyph_advance(face: &Face, ch: char, font_size: f32) -> f32 {
    let scale = font_size / face.units_per_em() as f32;
    face.glyph_index(ch)
        .and_then(|gid| face.glyph_hor_advance(gid))
        .map(|adv| adv as f32 * scale)
        .unwrap_or(font_size * 0.5)
}

/// Fills the outline of `ch` centered on the origin of `transform`.
fn draw_glyph(pixmap: &mut Pixmap, face: &Face, ch: char, font_size: f32, transform: Affine, paint: &Paint) {
    let Some(gid) = face.glyph_index(ch) else {
        return;
    };
    let scale = font_size / face.units_per_em() as f32;
    let advance = face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale;
    let cap_height = face
        .capital_height()
        .map(|h| h as f32)
        .unwrap_or(face.ascender() as f32 * 0.7)
        * scale;

    let mut outline = SkiaOutline {
        builder: PathBuilder::new(),
        scale,
        dx: -advance / 2.0,
        dy: cap_height / 2.0,
    };
    if face.outline_glyph(gid, &mut outline).is_none() {
        return;
    }
    if let Some(path) = outline.builder.finish() {
        pixmap.fill_path(&path, paint, FillRule::Winding, to_skia(transform), None);
    }
}

fn line_width(face: &Face, text: &str, font_size: f32) -> f32 {
    text.chars().map(|ch| glyph_advance(face, ch, font_size)).sum()
}

/// Shrinks `preferred` until `text` fits in `max_width`.
fn fit_font_size(face: &Face, text: &str, preferred: f32, max_width: f32) -> f32 {
    let width = line_width(face, text, preferred);
    if width > max_width && width > 0.0 {
        preferred * max_width / width
    } else {
        preferred
    }
}

fn draw_centered_line(
    pixmap: &mut Pixmap,
    face: &Face,
    text: &str,
    font_size: f32,
    center_x: f32,
    center_y: f32,
    paint: &Paint,
) {
    let mut x = center_x - line_width(face, text, font_size) / 2.0;
    for ch in text.chars() {
        let advance = glyph_advance(face, ch, font_size);
        draw_glyph(pixmap, face, ch, font_size, Affine::translation(x + advance / 2.0, center_y), paint);
        x += advance;
    }
}

/// Draws an encoded raster scaled to fit the box, keeping its aspect ratio.
fn draw_logo(pixmap: &mut Pixmap, bytes: &[u8], x: f32, y: f32, width: f32, height: f32) -> Result<(), String> {
    let rgba = image::load_from_memory(bytes).map_err(|e| e.to_string())?.to_rgba8();
    let (w, h) = rgba.dimensions();
    let size = tiny_skia::IntSize::from_wh(w, h).ok_or_else(|| format!("empty logo {}x{}", w, h))?;

    // tiny-skia stores premultiplied alpha.
    let mut data = rgba.into_raw();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        for channel in &mut px[..3] {
            *channel = ((*channel as u16 * a + 127) / 255) as u8;
        }
    }
    let logo = Pixmap::from_vec(data, size).ok_or_else(|| "logo pixel buffer rejected".to_string())?;

    let scale = (width / w as f32).min(height / h as f32);
    let tx = x + (width - w as f32 * scale) / 2.0;
    let ty = y + (height - h as f32 * scale) / 2.0;
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    pixmap.draw_pixmap(0, 0, logo.as_ref(), &paint, Transform::from_row(scale, 0.0, 0.0, scale, tx, ty), None);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn request() -> StampRequest {
        StampRequest {
            top_text: Some("QUINCAILLERIE DU PLATEAU".into()),
            bottom_text: Some("CI-ABJ-2024-B-123 • 07 00 00 00".into()),
            title: Some("LE GÉRANT".into()),
            address: Some("Boulevard de la République, Abidjan Plateau".into()),
            logo: None,
        }
    }

    #[test]
    fn renders_or_reports_unavailable() {
        let renderer = SkiaStampRenderer::new(StampConfig::default());
        match renderer.render(&request()) {
            StampOutcome::Rendered(image) => {
                assert!(renderer.is_available());
                assert!(image.png.starts_with(&PNG_SIGNATURE));
                assert_eq!((image.width_px, image.height_px), (360, 360));
                let decoded = image::load_from_memory(&image.png).unwrap().to_rgba8();
                // Transparent corner, inked ring on the horizontal axis.
                assert_eq!(decoded.get_pixel(0, 0)[3], 0);
                // The outer ring sits 1.5 stroke widths (~6.5px) inside the edge.
                assert!((3..=10).any(|x| decoded.get_pixel(x, 180)[3] > 0));
                assert!((3..=10).any(|x| decoded.get_pixel(359 - x, 180)[3] > 0));
            }
            StampOutcome::Unavailable { reason } => {
                assert!(!renderer.is_available());
                assert!(reason.contains("font"), "{}", reason);
            }
        }
    }

    #[test]
    fn missing_font_file_is_unavailable() {
        let renderer = SkiaStampRenderer::new(StampConfig {
            font_path: Some("/nonexistent/stamp-font.ttf".into()),
            ..StampConfig::default()
        });
        assert!(!renderer.is_available());
        assert!(renderer.render(&request()).image().is_none());
    }

    #[test]
    fn undecodable_logo_is_skipped() {
        let renderer = SkiaStampRenderer::new(StampConfig::default());
        let with_bad_logo = StampRequest {
            logo: Some(b"not an image".to_vec()),
            ..request()
        };
        let plain = renderer.render(&request());
        let degraded = renderer.render(&with_bad_logo);
        assert_eq!(plain, degraded);
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = SkiaStampRenderer::new(StampConfig::default());
        assert_eq!(renderer.render(&request()), renderer.render(&request()));
    }
}
