//! Business document rendering: quotes, invoices, receipts and discharges as
//! paginated PDF.
//!
//! [`DocumentComposer`] lays a [`DocumentSpec`] out on pages, adds the
//! issuer's rubber stamp and a QR code in the footer when those capabilities
//! are available, and writes the PDF.
//!
//! ```no_run
//! use quitus::{DocumentComposer, DocumentKind, DocumentSpec, LineItem, RendererConfig};
//! use quitus::types::DocumentBody;
//!
//! let composer = DocumentComposer::new(RendererConfig::default());
//! let mut spec = DocumentSpec::new(DocumentKind::Quote);
//! spec.body = DocumentBody::Items(vec![LineItem::new("Ciment 50kg", 10.0, 5500.0)]);
//! let pdf = composer.compose(&spec, None)?;
//! std::fs::write("devis.pdf", pdf.as_bytes())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod composer;
pub mod config;
pub mod error;

pub use composer::{ComposedLayout, DocumentComposer, FooterLayout, RenderedDocument};
pub use config::{FooterConfig, RendererConfig};
pub use error::ComposeError;

pub use quitus_types::{
    BusinessProfile, DocumentKind, DocumentSpec, FinancialSummary, InvoiceVariant, LineItem, Party,
};

// Re-export the member crates for callers that need the lower layers
pub use quitus_layout as layout;
pub use quitus_qr as qr;
pub use quitus_render_lopdf as render;
pub use quitus_stamp as stamp;
pub use quitus_types as types;
