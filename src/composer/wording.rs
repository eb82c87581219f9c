//! French wording of generated sentences.

use super::style::PLACEHOLDER;
use crate::config::FooterConfig;
use quitus_layout::format_amount;
use quitus_types::{DischargeDetails, Party, non_blank};

pub(crate) fn display(value: Option<&str>) -> &str {
    non_blank(value).unwrap_or(PLACEHOLDER)
}

pub(crate) fn money(value: f64, currency: &str) -> String {
    format!("{} {}", format_amount(value), currency)
}

/// Most decimals printed for a quantity below one hundredth.
const MAX_QUANTITY_DECIMALS: usize = 6;

/// Quantities are grouped like amounts. Fractional ones keep up to two
/// decimals after a comma, or as many as it takes to show one significant
/// digit.
pub(crate) fn format_quantity(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "0".to_string();
    }
    if (value - value.round()).abs() < 1e-9 {
        return format_amount(value);
    }
    let mut decimals = 2;
    while decimals < MAX_QUANTITY_DECIMALS && (value * 10f64.powi(decimals as i32)).round() == 0.0 {
        decimals += 1;
    }
    let fixed = format!("{:.*}", decimals, value);
    let fixed = fixed.trim_end_matches('0').trim_end_matches('.');
    match fixed.split_once('.') {
        Some((whole, fraction)) => {
            let whole = whole.parse::<f64>().map(format_amount).unwrap_or_else(|_| whole.to_string());
            format!("{},{}", whole, fraction)
        }
        None => fixed.parse::<f64>().map(format_amount).unwrap_or_else(|_| fixed.to_string()),
    }
}

pub(crate) fn party_lines(party: &Party) -> [String; 4] {
    [
        format!("Nom : {}", display(party.name.as_deref())),
        format!("Pièce : {}", display(party.id_number.as_deref())),
        format!("Tél : {}", display(party.phone.as_deref())),
        format!("Adresse : {}", display(party.address.as_deref())),
    ]
}

fn identity(party: &Party) -> String {
    let name = display(party.name.as_deref());
    match non_blank(party.id_number.as_deref()) {
        Some(id) => format!("{}, titulaire de la pièce n° {},", name, id),
        None => name.to_string(),
    }
}

/// The two reciprocal attestations of a discharge: the first party
/// acknowledges receipt, the second acknowledges the handover.
///
/// The same wording serves individuals and businesses.
pub(crate) fn discharge_paragraphs(
    party1: &Party,
    party2: &Party,
    details: &DischargeDetails,
    fallback_amount: Option<f64>,
    currency: &str,
) -> [String; 2] {
    let amount = match details.amount.or(fallback_amount) {
        Some(value) => money(value, currency),
        None => format!("{} {}", PLACEHOLDER, currency),
    };
    let amount = match non_blank(details.amount_words.as_deref()) {
        Some(words) => format!("{} ({})", amount, words),
        None => amount,
    };
    let object = display(details.object.as_deref());
    let name1 = display(party1.name.as_deref());
    let name2 = display(party2.name.as_deref());

    [
        format!(
            "Je soussigné(e) {} reconnais avoir reçu de {} la somme de {} au titre de : {}.",
            identity(party1),
            name2,
            amount,
            object
        ),
        format!(
            "Je soussigné(e) {} reconnais avoir remis à {} la somme de {} au titre de : {}.",
            identity(party2),
            name1,
            amount,
            object
        ),
    ]
}

pub(crate) fn call_to_action(footer: &FooterConfig, with_qr: bool) -> String {
    let mut text = format!("Document généré avec {}.", footer.brand_name.trim());
    match non_blank(footer.contact_number.as_deref()) {
        Some(number) => text.push_str(&format!(
            " Créez vos devis, factures et reçus par WhatsApp au {}.",
            number
        )),
        None => text.push_str(" Créez vos devis, factures et reçus en quelques messages."),
    }
    if with_qr {
        text.push_str(" Scannez le code pour commencer.");
    }
    text
}
