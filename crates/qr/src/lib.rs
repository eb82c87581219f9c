//! QR-code capability used by the document footer.
//!
//! Encoding is best effort: an encoder that cannot produce an image answers
//! with [`QrOutcome::NoImage`] and the caller lays the footer out without it.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

mod link;
pub use link::{contact_link, percent_encode};

#[cfg(feature = "encoder")]
mod encoder;
#[cfg(feature = "encoder")]
pub use encoder::QrCodeEncoder;

#[derive(Error, Debug)]
pub enum QrError {
    #[error("QR code encoding error: {0}")]
    Encode(String),
    #[error("PNG encoding error: {0}")]
    Png(String),
}

/// Error correction level of the generated symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    /// ~7% recovery
    Low,
    /// ~15% recovery
    #[default]
    Medium,
    /// ~25% recovery
    Quartile,
    /// ~30% recovery
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QrOptions {
    /// Largest edge length of the square image in pixels. Modules are drawn
    /// as whole pixels, so the image is the largest multiple of the module
    /// count that fits, and never less than one pixel per module.
    pub size_px: u32,
    pub error_correction: ErrorCorrection,
    /// Quiet zone in modules.
    pub quiet_zone: u32,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            size_px: 192,
            error_correction: ErrorCorrection::Medium,
            quiet_zone: 2,
        }
    }
}

/// A square PNG ready for embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct QrImage {
    pub png: Vec<u8>,
    pub size_px: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QrOutcome {
    Encoded(QrImage),
    NoImage { reason: String },
}

impl QrOutcome {
    pub fn image(self) -> Option<QrImage> {
        match self {
            QrOutcome::Encoded(image) => Some(image),
            QrOutcome::NoImage { .. } => None,
        }
    }
}

pub trait QrEncoder: Send + Sync {
    /// Whether an encoding backend is present at all.
    fn is_available(&self) -> bool;

    /// Encodes `payload`. Never fails hard.
    fn encode(&self, payload: &str) -> QrOutcome;
}

/// Encoder used when QR support is compiled out or switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledQrEncoder;

impl QrEncoder for DisabledQrEncoder {
    fn is_available(&self) -> bool {
        false
    }

    fn encode(&self, _payload: &str) -> QrOutcome {
        QrOutcome::NoImage {
            reason: "QR code generation requires the 'encoder' feature".to_string(),
        }
    }
}

/// The best encoder this build offers.
pub fn default_encoder(options: QrOptions) -> Arc<dyn QrEncoder> {
    #[cfg(feature = "encoder")]
    {
        Arc::new(QrCodeEncoder::new(options))
    }
    #[cfg(not(feature = "encoder"))]
    {
        let _ = options;
        Arc::new(DisabledQrEncoder)
    }
}
