//! Document composition: layout of every section, capability calls for the
//! stamp and QR rasters, then the PDF stage.

mod footer;
mod sections;
mod style;
mod wording;

pub use footer::FooterLayout;

use crate::config::RendererConfig;
use crate::error::ComposeError;
use quitus_layout::{ImageElement, LayoutElement, LayoutEngine, PositionedElement};
use quitus_qr::{QrEncoder, QrOutcome, contact_link};
use quitus_render_lopdf::{DocumentInfo, LopdfRenderer, validate_image};
use quitus_stamp::{StampBackend, StampOutcome, StampRequest};
use quitus_types::{BusinessProfile, DocumentBody, DocumentSpec, Rect, non_blank};
use std::collections::BTreeMap;
use std::sync::Arc;
use style::{FOOTER_GAP, FOOTER_HEIGHT, QR_KEY, SECTION_GAP, STAMP_KEY};

/// The laid-out document, before it is written as PDF.
#[derive(Debug, Clone)]
pub struct ComposedLayout {
    pub pages: Vec<Vec<PositionedElement>>,
    /// Encoded rasters referenced by image elements, by key.
    pub images: BTreeMap<String, Vec<u8>>,
    /// Frame of the stamp box, present on every document.
    pub stamp_box: Rect,
    /// Zero-based page holding the stamp box.
    pub stamp_page: usize,
    pub footer: FooterLayout,
}

/// A finished PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument(Vec<u8>);

impl RenderedDocument {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Produces complete documents from a [`DocumentSpec`].
///
/// Holds only read-only configuration and capability handles, so one
/// composer can serve any number of threads.
pub struct DocumentComposer {
    config: RendererConfig,
    stamp: Arc<dyn StampBackend>,
    qr: Arc<dyn QrEncoder>,
}

impl DocumentComposer {
    /// Uses the stamp and QR backends enabled at compile time.
    pub fn new(config: RendererConfig) -> Self {
        let stamp = quitus_stamp::default_backend(config.stamp.clone());
        let qr = quitus_qr::default_encoder(config.qr);
        Self::with_backends(config, stamp, qr)
    }

    pub fn with_backends(config: RendererConfig, stamp: Arc<dyn StampBackend>, qr: Arc<dyn QrEncoder>) -> Self {
        Self { config, stamp, qr }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Lays the document out. Stamp and QR failures degrade the layout;
    /// only geometry problems fail it. A raster the PDF stage could not
    /// embed counts as a failure of the capability that produced it.
    pub fn layout(
        &self,
        spec: &DocumentSpec,
        profile: Option<&BusinessProfile>,
    ) -> Result<ComposedLayout, ComposeError> {
        let mut engine = LayoutEngine::new(self.config.layout)?;
        engine.reserve_bottom(FOOTER_HEIGHT + FOOTER_GAP)?;
        let currency = self.config.currency.as_str();

        sections::title_block(&mut engine, &spec.kind, profile)?;
        engine.skip(SECTION_GAP / 2.0);
        sections::reference_line(&mut engine, spec)?;
        engine.skip(SECTION_GAP);
        sections::party_boxes(&mut engine, &spec.kind, &spec.party1, &spec.party2)?;
        engine.skip(SECTION_GAP);

        match &spec.body {
            DocumentBody::Items(items) => {
                sections::item_table(&mut engine, items)?;
                if !spec.summary.is_empty() {
                    engine.skip(SECTION_GAP / 2.0);
                    sections::summary_block(&mut engine, &spec.summary, currency)?;
                }
            }
            DocumentBody::Discharge(details) => {
                sections::discharge_block(&mut engine, spec, details, currency)?;
            }
        }

        if non_blank(spec.place.as_deref()).is_some() {
            engine.skip(SECTION_GAP);
            sections::place_line(&mut engine, spec)?;
        }
        engine.skip(SECTION_GAP);
        sections::signature_boxes(&mut engine, &spec.kind)?;
        engine.skip(SECTION_GAP);
        let slot = sections::stamp_box(&mut engine)?;

        let mut images = BTreeMap::new();
        match profile {
            Some(profile) => match self.stamp.render(&StampRequest::from_profile(profile)) {
                StampOutcome::Rendered(stamp) => match validate_image(&stamp.png) {
                    Ok(_) => {
                        images.insert(STAMP_KEY.to_string(), stamp.png);
                        engine.push_to_page(
                            slot.page,
                            PositionedElement::new(
                                slot.image,
                                LayoutElement::Image(ImageElement {
                                    key: STAMP_KEY.to_string(),
                                }),
                            ),
                        );
                    }
                    Err(err) => {
                        log::warn!("Stamp raster cannot be embedded, keeping an empty stamp box: {}", err);
                    }
                },
                StampOutcome::Unavailable { reason } => {
                    log::warn!("Stamp not rendered, keeping an empty stamp box: {}", reason);
                }
            },
            None => log::debug!("No business profile; stamp box left empty"),
        }

        let footer_config = &self.config.footer;
        let link = contact_link(
            footer_config.contact_number.as_deref().unwrap_or_default(),
            &footer_config.prefill_text,
        );
        let qr = match self.qr.encode(&link) {
            QrOutcome::Encoded(image) => match validate_image(&image.png) {
                Ok(_) => Some(image),
                Err(err) => {
                    log::warn!("QR raster cannot be embedded, widening the text: {}", err);
                    None
                }
            },
            QrOutcome::NoImage { reason } => {
                log::warn!("No QR code in the footer, widening the text: {}", reason);
                None
            }
        };
        let footer = FooterLayout::new(&self.config.layout, qr.is_some());
        if let Some(image) = qr {
            images.insert(QR_KEY.to_string(), image.png);
        }
        let call_to_action = wording::call_to_action(footer_config, footer.qr.is_some());

        let page_count = engine.page_count();
        for page in 0..page_count {
            for element in footer.elements(&call_to_action) {
                engine.push_to_page(page, element);
            }
            if page_count > 1 {
                engine.push_to_page(page, footer::page_number(&self.config.layout, page, page_count));
            }
        }

        log::debug!(
            "Laid out {} on {} page(s) with {} image(s)",
            spec.kind.title(),
            page_count,
            images.len()
        );

        Ok(ComposedLayout {
            pages: engine.into_pages(),
            images,
            stamp_box: slot.frame,
            stamp_page: slot.page,
            footer,
        })
    }

    /// Lays the document out and writes it as PDF.
    pub fn compose(
        &self,
        spec: &DocumentSpec,
        profile: Option<&BusinessProfile>,
    ) -> Result<RenderedDocument, ComposeError> {
        let layout = self.layout(spec, profile)?;
        let title = match non_blank(spec.doc_number.as_deref()) {
            Some(number) => format!("{} {}", spec.kind.title(), number),
            None => spec.kind.title().to_string(),
        };
        let info = DocumentInfo {
            title,
            producer: self.config.producer.clone(),
        };
        let bytes = LopdfRenderer::new(self.config.layout.page_size).render(&layout.pages, &layout.images, &info)?;
        Ok(RenderedDocument(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quitus_qr::DisabledQrEncoder;
    use quitus_stamp::DisabledStampRenderer;
    use quitus_types::{DocumentKind, LineItem, Party};

    fn composer() -> DocumentComposer {
        DocumentComposer::with_backends(
            RendererConfig::default(),
            Arc::new(DisabledStampRenderer),
            Arc::new(DisabledQrEncoder),
        )
    }

    fn texts(layout: &ComposedLayout) -> Vec<String> {
        layout
            .pages
            .iter()
            .flatten()
            .filter_map(|el| match &el.element {
                LayoutElement::Text(t) => Some(t.content.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn composer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DocumentComposer>();
    }

    #[test]
    fn missing_fields_become_placeholders() {
        let layout = composer().layout(&DocumentSpec::new(DocumentKind::Quote), None).unwrap();
        let texts = texts(&layout);
        assert!(texts.contains(&"DEVIS".to_string()));
        assert!(texts.contains(&"N° —".to_string()));
        assert!(texts.contains(&"Nom : —".to_string()));
        assert!(texts.contains(&"TAMPON".to_string()));
        assert!(layout.images.is_empty());
    }

    #[test]
    fn summary_rows_are_printed_verbatim() {
        let mut spec = DocumentSpec::new(DocumentKind::Invoice {
            variant: Default::default(),
        });
        spec.party2 = Party::named("Client SA");
        spec.body = DocumentBody::Items(vec![LineItem::new("Sac de riz", 2.0, 18000.0)]);
        spec.summary.net = Some(36000.0);
        spec.summary.vat = Some(6480.0);
        // Deliberately inconsistent: the composer must not recompute.
        spec.summary.due = Some(40000.0);
        let texts = texts(&composer().layout(&spec, None).unwrap());
        assert!(texts.contains(&"36 000 FCFA".to_string()));
        assert!(texts.contains(&"6 480 FCFA".to_string()));
        assert!(texts.contains(&"40 000 FCFA".to_string()));
        assert!(texts.contains(&"NET À PAYER".to_string()));
        assert!(!texts.contains(&"Sous-total".to_string()));
    }

    #[test]
    fn single_page_has_no_page_number() {
        let layout = composer().layout(&DocumentSpec::new(DocumentKind::Receipt), None).unwrap();
        assert_eq!(layout.pages.len(), 1);
        assert!(!texts(&layout).iter().any(|t| t.starts_with("Page ")));
    }

    #[test]
    fn compose_error_names_the_stage() {
        let mut config = RendererConfig::default();
        config.layout.margins = quitus_types::Margins::all(400.0);
        let composer = DocumentComposer::with_backends(config, Arc::new(DisabledStampRenderer), Arc::new(DisabledQrEncoder));
        let err = composer.compose(&DocumentSpec::new(DocumentKind::Quote), None).unwrap_err();
        assert_eq!(err.stage(), "layout");
    }
}
