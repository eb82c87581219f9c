//! Fonts, colors and fixed dimensions shared by the document sections.

use quitus_layout::FontSpec;
use quitus_types::Color;

pub(crate) const TITLE: FontSpec = FontSpec::bold(18.0);
pub(crate) const BRAND: FontSpec = FontSpec::bold(11.0);
pub(crate) const BODY: FontSpec = FontSpec::regular(9.5);
pub(crate) const BODY_BOLD: FontSpec = FontSpec::bold(9.5);
pub(crate) const LABEL: FontSpec = FontSpec::bold(8.5);
pub(crate) const SMALL: FontSpec = FontSpec::regular(8.0);
pub(crate) const TOTAL: FontSpec = FontSpec::bold(11.0);

pub(crate) const INK: Color = Color::BLACK;
pub(crate) const MUTED: Color = Color::gray(90);
pub(crate) const HEADER_FILL: Color = Color::gray(230);
pub(crate) const RULE: Color = Color::gray(160);

/// Printed for any missing display value.
pub(crate) const PLACEHOLDER: &str = "—";

pub(crate) const SECTION_GAP: f32 = 14.0;
pub(crate) const COLUMN_GAP: f32 = 16.0;
pub(crate) const BOX_PADDING: f32 = 6.0;
pub(crate) const PARTY_MIN_HEIGHT: f32 = 70.0;
pub(crate) const SIGNATURE_HEIGHT: f32 = 80.0;
pub(crate) const STAMP_BOX_SIDE: f32 = 150.0;

pub(crate) const TABLE_HEADER_HEIGHT: f32 = 20.0;
pub(crate) const TABLE_MIN_ROW_HEIGHT: f32 = 20.0;
pub(crate) const CELL_PADDING: f32 = 4.0;
pub(crate) const QUANTITY_WIDTH: f32 = 50.0;
pub(crate) const UNIT_PRICE_WIDTH: f32 = 80.0;
pub(crate) const AMOUNT_WIDTH: f32 = 90.0;

pub(crate) const SUMMARY_WIDTH: f32 = 240.0;
pub(crate) const SUMMARY_ROW_HEIGHT: f32 = 16.0;
pub(crate) const TOTAL_ROW_HEIGHT: f32 = 22.0;

pub(crate) const FOOTER_HEIGHT: f32 = 64.0;
pub(crate) const FOOTER_GAP: f32 = 10.0;
pub(crate) const FOOTER_PADDING: f32 = 4.0;

pub(crate) const STAMP_KEY: &str = "stamp";
pub(crate) const QR_KEY: &str = "qr";
