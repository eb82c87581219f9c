//! Circular rubber-stamp rendering.
//!
//! The stamp is two concentric rings with the business name set along the
//! top arc, the tax id and phone along the bottom arc, and a centered block
//! (logo, role title, address) inside the inner ring. Rasterization is a
//! capability: when no backend or font is available the renderer reports
//! [`StampOutcome::Unavailable`] and the document keeps an empty stamp box.

use quitus_types::{BusinessProfile, non_blank};
use std::sync::Arc;
use thiserror::Error;

pub mod arc;
pub mod config;
pub mod text;
pub mod transform;

#[cfg(feature = "raster")]
mod raster;
#[cfg(feature = "raster")]
pub use raster::SkiaStampRenderer;

pub use arc::{ArcParams, ArcSide, GlyphPlacement, plan_arc};
pub use config::StampConfig;
pub use text::truncate_with_ellipsis;
pub use transform::{Affine, TransformStack};

#[derive(Error, Debug)]
pub enum StampError {
    #[error("No usable font: {0}")]
    FontUnavailable(String),
    #[error("Failed to create pixmap {0}x{0}")]
    Pixmap(u32),
    #[error("PNG encoding failed: {0}")]
    Png(String),
}

/// What to print on the stamp. Blank fields are left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StampRequest {
    /// Set along the top arc.
    pub top_text: Option<String>,
    /// Set along the bottom arc.
    pub bottom_text: Option<String>,
    pub title: Option<String>,
    pub address: Option<String>,
    /// Encoded PNG or JPEG.
    pub logo: Option<Vec<u8>>,
}

impl StampRequest {
    pub fn from_profile(profile: &BusinessProfile) -> Self {
        let bottom: Vec<&str> = [profile.preferred_tax_id(), non_blank(profile.phone.as_deref())]
            .into_iter()
            .flatten()
            .collect();
        Self {
            top_text: non_blank(profile.business_name.as_deref()).map(str::to_uppercase),
            bottom_text: (!bottom.is_empty()).then(|| bottom.join(" • ")),
            title: non_blank(profile.stamp_title.as_deref()).map(str::to_string),
            address: non_blank(profile.address.as_deref()).map(str::to_string),
            logo: profile.logo.clone().filter(|bytes| !bytes.is_empty()),
        }
    }
}

/// A square PNG with a transparent background.
#[derive(Debug, Clone, PartialEq)]
pub struct StampImage {
    pub png: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StampOutcome {
    Rendered(StampImage),
    Unavailable { reason: String },
}

impl StampOutcome {
    pub fn image(self) -> Option<StampImage> {
        match self {
            StampOutcome::Rendered(image) => Some(image),
            StampOutcome::Unavailable { .. } => None,
        }
    }
}

pub trait StampBackend: Send + Sync {
    /// Whether this backend can rasterize at all.
    fn is_available(&self) -> bool;

    /// Renders the stamp. Never fails hard.
    fn render(&self, request: &StampRequest) -> StampOutcome;
}

/// Backend used when stamp rasterization is compiled out or switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledStampRenderer;

impl StampBackend for DisabledStampRenderer {
    fn is_available(&self) -> bool {
        false
    }

    fn render(&self, _request: &StampRequest) -> StampOutcome {
        StampOutcome::Unavailable {
            reason: "Stamp rasterization requires the 'raster' feature".to_string(),
        }
    }
}

/// The best backend this build offers.
pub fn default_backend(config: StampConfig) -> Arc<dyn StampBackend> {
    #[cfg(feature = "raster")]
    {
        Arc::new(SkiaStampRenderer::new(config))
    }
    #[cfg(not(feature = "raster"))]
    {
        let _ = config;
        Arc::new(DisabledStampRenderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_from_profile_joins_secondary_line() {
        let profile = BusinessProfile {
            business_name: Some("Boutique Awa".into()),
            phone: Some("07 00 00 00".into()),
            tax_id: Some("CI-ABJ-2024".into()),
            ..Default::default()
        };
        let request = StampRequest::from_profile(&profile);
        assert_eq!(request.top_text.as_deref(), Some("BOUTIQUE AWA"));
        assert_eq!(request.bottom_text.as_deref(), Some("CI-ABJ-2024 • 07 00 00 00"));
        assert!(request.title.is_none());
    }

    #[test]
    fn request_from_empty_profile_is_blank() {
        let request = StampRequest::from_profile(&BusinessProfile::default());
        assert_eq!(request, StampRequest::default());
    }

    #[test]
    fn disabled_backend_is_unavailable() {
        let backend = DisabledStampRenderer;
        assert!(!backend.is_available());
        assert!(backend.render(&StampRequest::default()).image().is_none());
    }
}
