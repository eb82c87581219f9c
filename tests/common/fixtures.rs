#![allow(dead_code)]

use quitus::types::{DischargeDetails, DocumentBody};
use quitus::{BusinessProfile, DocumentKind, DocumentSpec, InvoiceVariant, LineItem, Party};

pub fn business_profile() -> BusinessProfile {
    BusinessProfile {
        business_name: Some("Quincaillerie du Plateau".into()),
        address: Some("Rue du Commerce, Abidjan".into()),
        phone: Some("+225 07 12 34 56 78".into()),
        tax_id: Some("CI-ABJ-2024-B-1234".into()),
        alt_tax_id: None,
        stamp_title: Some("LA DIRECTION".into()),
        logo: None,
    }
}

pub fn discharge_spec() -> DocumentSpec {
    let mut spec = DocumentSpec::new(DocumentKind::Discharge);
    spec.doc_number = Some("DEV-2025-JAN-0001".into());
    spec.date = Some("10/01/2025".into());
    spec.place = Some("Abidjan".into());
    spec.party1 = Party {
        name: Some("Awa KONE".into()),
        id_number: Some("CI-0012345".into()),
        phone: Some("0701020304".into()),
        address: None,
    };
    spec.party2 = Party::named("Issa DIALLO");
    spec.body = DocumentBody::Discharge(DischargeDetails {
        object: Some("avance sur salaire".into()),
        amount_words: Some("cent cinquante mille".into()),
        amount: Some(150000.0),
    });
    spec
}

pub fn invoice_spec(items: Vec<LineItem>) -> DocumentSpec {
    let mut spec = DocumentSpec::new(DocumentKind::Invoice {
        variant: InvoiceVariant::Regular,
    });
    spec.doc_number = Some("FAC-2025-JAN-0042".into());
    spec.date = Some("20/01/2025".into());
    spec.party1 = Party::named("Quincaillerie du Plateau");
    spec.party2 = Party::named("Entreprise BATI SARL");
    spec.body = DocumentBody::Items(items);
    spec
}

/// `count` short, single-line items.
pub fn many_items(count: usize) -> Vec<LineItem> {
    (1..=count)
        .map(|i| LineItem::new(format!("Article {}", i), 1.0, 1000.0 * i as f64))
        .collect()
}
