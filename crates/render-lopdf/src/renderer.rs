use crate::RenderError;
use crate::helpers::{PageContext, font_resource_name};
use crate::images::embed_image;
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};
use quitus_layout::{PositionedElement, StandardFont};
use quitus_types::Size;
use std::collections::{BTreeMap, HashMap};

/// Metadata written to the PDF Info dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
}

/// Writes a complete PDF for already laid-out pages.
///
/// Output is a pure function of the input: no dates or random identifiers
/// are written, objects are numbered in page order and images in key order.
#[derive(Debug, Clone, Copy)]
pub struct LopdfRenderer {
    page_size: Size,
}

impl LopdfRenderer {
    pub fn new(page_size: Size) -> Self {
        Self { page_size }
    }

    pub fn render(
        &self,
        pages: &[Vec<PositionedElement>],
        images: &BTreeMap<String, Vec<u8>>,
        info: &DocumentInfo,
    ) -> Result<Vec<u8>, RenderError> {
        if pages.is_empty() {
            return Err(RenderError::Pdf("document has no pages".into()));
        }

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut font_dict = Dictionary::new();
        for face in [StandardFont::Helvetica, StandardFont::HelveticaBold] {
            let single_font_dict = dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.postscript_name(),
                "Encoding" => "WinAnsiEncoding",
            };
            font_dict.set(font_resource_name(face), Object::Dictionary(single_font_dict));
        }

        let mut xobjects = Dictionary::new();
        let mut image_names = HashMap::new();
        for (i, (key, bytes)) in images.iter().enumerate() {
            let name = format!("Im{}", i + 1);
            let image_id = embed_image(&mut doc, bytes)?;
            xobjects.set(name.as_bytes(), image_id);
            image_names.insert(key.clone(), name);
        }

        let mut resources = dictionary! { "Font" => font_dict };
        if !xobjects.is_empty() {
            resources.set("XObject", xobjects);
        }
        let resources_id = doc.add_object(resources);

        let mut page_ids = Vec::with_capacity(pages.len());
        for elements in pages {
            let mut page_ctx = PageContext::new(self.page_size.height, &image_names);
            for el in elements {
                page_ctx.draw_element(el)?;
            }
            let content = page_ctx.finish().encode()?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));

            let page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.0.into(), 0.0.into(), self.page_size.width.into(), self.page_size.height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            };
            page_ids.push(doc.add_object(page_dict));
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
            "Count" => page_ids.len() as i64,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let info_id = doc.add_object(dictionary! {
            "Title" => text_string(&info.title),
            "Producer" => text_string(&info.producer),
        });
        doc.trailer.set("Info", info_id);

        log::debug!("Writing PDF '{}' with {} page(s)", info.title, page_ids.len());

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

/// A PDF text string: plain bytes for ASCII, UTF-16BE with a byte order mark
/// otherwise.
fn text_string(s: &str) -> Object {
    if s.is_ascii() {
        return Object::String(s.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xfe, 0xff];
    for unit in s.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quitus_layout::{FontSpec, LayoutElement, RectElement, TextElement};
    use quitus_types::{Color, Rect};

    fn info() -> DocumentInfo {
        DocumentInfo {
            title: "REÇU R-001".into(),
            producer: "quitus".into(),
        }
    }

    fn text(content: &str, y: f32) -> PositionedElement {
        PositionedElement::new(
            Rect::new(40.0, y, 200.0, 12.0),
            LayoutElement::Text(TextElement {
                content: content.into(),
                font: FontSpec::regular(10.0),
                color: Color::BLACK,
            }),
        )
    }

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 128]));
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        png
    }

    #[test]
    fn writes_a_loadable_pdf_with_one_page_per_layout_page() {
        let pages = vec![
            vec![text("Bonjour", 40.0)],
            vec![
                text("Deuxième page", 40.0),
                PositionedElement::new(
                    Rect::new(40.0, 80.0, 100.0, 50.0),
                    LayoutElement::Rectangle(RectElement::outlined(Color::BLACK)),
                ),
            ],
        ];
        let bytes = LopdfRenderer::new(Size::a4())
            .render(&pages, &BTreeMap::new(), &info())
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
        let first = doc.extract_text(&[1]).unwrap();
        assert!(first.contains("Bonjour"), "{}", first);
        let second = doc.extract_text(&[2]).unwrap();
        assert!(second.contains("Deuxième page"), "{}", second);
    }

    #[test]
    fn images_become_xobjects_with_soft_masks() {
        let mut images = BTreeMap::new();
        images.insert("qr".to_string(), tiny_png());
        let pages = vec![vec![PositionedElement::new(
            Rect::new(40.0, 40.0, 50.0, 50.0),
            LayoutElement::Image(quitus_layout::ImageElement { key: "qr".into() }),
        )]];
        let bytes = LopdfRenderer::new(Size::a4()).render(&pages, &images, &info()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let image_count = doc
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .filter(|s| s.dict.get(b"Subtype").and_then(|o| o.as_name()).ok() == Some(b"Image".as_slice()))
            .count();
        assert_eq!(image_count, 2);
    }

    #[test]
    fn invalid_image_bytes_fail_the_render() {
        let mut images = BTreeMap::new();
        images.insert("stamp".to_string(), b"garbage".to_vec());
        let err = LopdfRenderer::new(Size::a4())
            .render(&[vec![]], &images, &info())
            .unwrap_err();
        assert!(matches!(err, RenderError::Image(_)));
    }

    #[test]
    fn no_pages_is_an_error() {
        assert!(LopdfRenderer::new(Size::a4()).render(&[], &BTreeMap::new(), &info()).is_err());
    }

    #[test]
    fn output_is_deterministic() {
        let pages = vec![vec![text("Stable", 40.0)]];
        let renderer = LopdfRenderer::new(Size::a4());
        let a = renderer.render(&pages, &BTreeMap::new(), &info()).unwrap();
        let b = renderer.render(&pages, &BTreeMap::new(), &info()).unwrap();
        assert_eq!(a, b);
    }
}
