//! The structured description of one business document, as handed over by the
//! conversational front end.
//!
//! Every display field that may be absent is an `Option`; the composer renders
//! a placeholder for it instead of failing. Nothing here is validated.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvoiceVariant {
    Proforma,
    #[default]
    Regular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DocumentKind {
    Quote,
    Invoice {
        #[serde(default)]
        variant: InvoiceVariant,
    },
    Receipt,
    Discharge,
}

impl DocumentKind {
    /// The heading printed at the top of the document.
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::Quote => "DEVIS",
            DocumentKind::Invoice {
                variant: InvoiceVariant::Proforma,
            } => "FACTURE PROFORMA",
            DocumentKind::Invoice {
                variant: InvoiceVariant::Regular,
            } => "FACTURE",
            DocumentKind::Receipt => "REÇU",
            DocumentKind::Discharge => "DÉCHARGE",
        }
    }

    /// Headings of the two party boxes, issuer side first.
    pub fn party_labels(&self) -> (&'static str, &'static str) {
        match self {
            DocumentKind::Quote | DocumentKind::Invoice { .. } => ("ÉMETTEUR", "CLIENT"),
            DocumentKind::Receipt => ("REÇU PAR", "VERSÉ PAR"),
            DocumentKind::Discharge => ("PARTIE 1", "PARTIE 2"),
        }
    }

    pub fn is_tabular(&self) -> bool {
        !matches!(self, DocumentKind::Discharge)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Party {
    pub name: Option<String>,
    pub id_number: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Party {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub designation: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(designation: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            designation: designation.into(),
            quantity,
            unit_price,
        }
    }

    /// Displayed line amount. Non-finite inputs are left for the formatter to
    /// normalize.
    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DischargeDetails {
    pub object: Option<String>,
    pub amount_words: Option<String>,
    pub amount: Option<f64>,
}

/// Totals exactly as computed upstream. The composer prints them verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialSummary {
    pub subtotal: Option<f64>,
    pub discount: Option<f64>,
    pub net: Option<f64>,
    pub vat: Option<f64>,
    pub deposit: Option<f64>,
    pub due: Option<f64>,
    pub gross: Option<f64>,
}

impl FinancialSummary {
    pub fn is_empty(&self) -> bool {
        *self == FinancialSummary::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum DocumentBody {
    Items(Vec<LineItem>),
    Discharge(DischargeDetails),
}

impl Default for DocumentBody {
    fn default() -> Self {
        DocumentBody::Items(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSpec {
    pub kind: DocumentKind,
    #[serde(default)]
    pub doc_number: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub party1: Party,
    #[serde(default)]
    pub party2: Party,
    #[serde(default)]
    pub body: DocumentBody,
    #[serde(default)]
    pub summary: FinancialSummary,
}

impl DocumentSpec {
    pub fn new(kind: DocumentKind) -> Self {
        let body = if kind.is_tabular() {
            DocumentBody::Items(Vec::new())
        } else {
            DocumentBody::Discharge(DischargeDetails::default())
        };
        Self {
            kind,
            doc_number: None,
            date: None,
            place: None,
            party1: Party::default(),
            party2: Party::default(),
            body,
            summary: FinancialSummary::default(),
        }
    }
}

/// Issuer branding used for the header and the stamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessProfile {
    pub business_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub tax_id: Option<String>,
    pub alt_tax_id: Option<String>,
    pub stamp_title: Option<String>,
    /// Encoded raster (PNG or JPEG) already fetched by the caller.
    #[serde(skip)]
    pub logo: Option<Vec<u8>>,
}

impl BusinessProfile {
    /// The first tax identifier available, preferring the primary one.
    pub fn preferred_tax_id(&self) -> Option<&str> {
        non_blank(self.tax_id.as_deref()).or_else(|| non_blank(self.alt_tax_id.as_deref()))
    }
}

/// Treats whitespace-only strings as missing.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn titles_follow_kind_and_variant() {
        assert_eq!(DocumentKind::Quote.title(), "DEVIS");
        assert_eq!(
            DocumentKind::Invoice {
                variant: InvoiceVariant::Proforma
            }
            .title(),
            "FACTURE PROFORMA"
        );
        assert_eq!(DocumentKind::Discharge.title(), "DÉCHARGE");
    }

    #[test]
    fn deserializes_discharge_from_camel_case_json() {
        let spec: DocumentSpec = serde_json::from_value(json!({
            "kind": { "type": "discharge" },
            "docNumber": "DEV-2025-JAN-0001",
            "party1": { "name": "Awa KONE" },
            "party2": { "name": "Issa DIALLO", "idNumber": "CI-123" },
            "body": { "type": "discharge", "data": { "amount": 150000.0, "amountWords": "cent cinquante mille" } }
        }))
        .unwrap();

        assert_eq!(spec.kind, DocumentKind::Discharge);
        assert_eq!(spec.party2.id_number.as_deref(), Some("CI-123"));
        match spec.body {
            DocumentBody::Discharge(d) => assert_eq!(d.amount, Some(150000.0)),
            other => panic!("unexpected body {:?}", other),
        }
        assert!(spec.summary.is_empty());
    }

    #[test]
    fn invoice_variant_defaults_to_regular() {
        let kind: DocumentKind = serde_json::from_value(json!({ "type": "invoice" })).unwrap();
        assert_eq!(kind.title(), "FACTURE");
    }

    #[test]
    fn preferred_tax_id_skips_blank_primary() {
        let profile = BusinessProfile {
            tax_id: Some("  ".into()),
            alt_tax_id: Some("RCCM-42".into()),
            ..Default::default()
        };
        assert_eq!(profile.preferred_tax_id(), Some("RCCM-42"));
    }
}
