//! Renderer configuration, resolved once and handed to the composer.

use quitus_layout::LayoutConfig;
use quitus_qr::QrOptions;
use quitus_stamp::StampConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterConfig {
    /// Product name quoted in the call to action.
    pub brand_name: String,
    /// Chat number the footer QR code opens. Any formatting is accepted;
    /// only digits are used in the link.
    pub contact_number: Option<String>,
    /// Message pre-filled in the chat opened by the QR code.
    pub prefill_text: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            brand_name: "Quitus".to_string(),
            contact_number: None,
            prefill_text: "Bonjour, je souhaite créer un document.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RendererConfig {
    pub layout: LayoutConfig,
    pub stamp: StampConfig,
    pub qr: QrOptions,
    pub footer: FooterConfig,
    /// Label printed after every amount.
    pub currency: String,
    /// Producer entry of the PDF Info dictionary.
    pub producer: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            stamp: StampConfig::default(),
            qr: QrOptions::default(),
            footer: FooterConfig::default(),
            currency: "FCFA".to_string(),
            producer: "quitus".to_string(),
        }
    }
}

impl RendererConfig {
    /// Parses a JSON configuration. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quitus_qr::ErrorCorrection;

    #[test]
    fn empty_json_is_the_default() {
        assert_eq!(RendererConfig::from_json("{}").unwrap(), RendererConfig::default());
    }

    #[test]
    fn nested_sections_merge_with_defaults() {
        let config = RendererConfig::from_json(
            r##"{
                "currency": "XOF",
                "qr": { "errorCorrection": "quartile" },
                "stamp": { "color": "#aa0000", "sizePx": 300 },
                "footer": { "contactNumber": "+225 07 00 00 00 00" }
            }"##,
        )
        .unwrap();
        assert_eq!(config.currency, "XOF");
        assert_eq!(config.qr.error_correction, ErrorCorrection::Quartile);
        assert_eq!(config.qr.size_px, 192);
        assert_eq!(config.stamp.size_px, 300);
        assert_eq!(config.stamp.color.to_hex(), "#aa0000");
        assert_eq!(config.footer.brand_name, "Quitus");
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(RendererConfig::from_json(r#"{ "currency": 5 }"#).is_err());
    }
}
