pub mod color;
pub mod document;
pub mod geometry;

pub use color::Color;
pub use document::{
    BusinessProfile, DischargeDetails, DocumentBody, DocumentKind, DocumentSpec, FinancialSummary,
    InvoiceVariant, LineItem, Party, non_blank,
};
pub use geometry::{Margins, Rect, Size};
