pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use quitus::qr::{QrEncoder, QrOutcome};
use quitus::stamp::{StampBackend, StampOutcome, StampRequest};
use quitus::{BusinessProfile, ComposeError, DocumentComposer, DocumentSpec, RendererConfig};
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }
}

/// QR encoder that always fails, as when the payload cannot be encoded.
pub struct FailingQrEncoder;

impl QrEncoder for FailingQrEncoder {
    fn is_available(&self) -> bool {
        true
    }

    fn encode(&self, _payload: &str) -> QrOutcome {
        QrOutcome::NoImage {
            reason: "forced failure".to_string(),
        }
    }
}

/// Stamp backend that always fails.
pub struct FailingStampBackend;

impl StampBackend for FailingStampBackend {
    fn is_available(&self) -> bool {
        true
    }

    fn render(&self, _request: &StampRequest) -> StampOutcome {
        StampOutcome::Unavailable {
            reason: "forced failure".to_string(),
        }
    }
}

/// Composer with both capabilities forced off, for layout-only checks.
pub fn degraded_composer(config: RendererConfig) -> DocumentComposer {
    DocumentComposer::with_backends(config, Arc::new(FailingStampBackend), Arc::new(FailingQrEncoder))
}

pub fn generate_pdf(
    composer: &DocumentComposer,
    spec: &DocumentSpec,
    profile: Option<&BusinessProfile>,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let rendered = composer.compose(spec, profile)?;
    GeneratedPdf::from_bytes(rendered.into_bytes())
}

#[allow(dead_code)]
pub fn expect_compose_error(
    composer: &DocumentComposer,
    spec: &DocumentSpec,
) -> Result<ComposeError, Box<dyn std::error::Error>> {
    match composer.compose(spec, None) {
        Ok(_) => Err("expected composition to fail".into()),
        Err(err) => Ok(err),
    }
}
