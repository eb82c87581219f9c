use crate::RenderError;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::{Document, ObjectId, Stream, dictionary};
use std::io::Write;

fn decode(bytes: &[u8]) -> Result<image::RgbaImage, RenderError> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|e| RenderError::Image(e.to_string()))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(RenderError::Image(format!("empty image {}x{}", width, height)));
    }
    Ok(rgba)
}

/// Checks that `bytes` decode to a raster [`embed_image`] accepts and returns
/// its pixel size.
pub fn validate_image(bytes: &[u8]) -> Result<(u32, u32), RenderError> {
    decode(bytes).map(|rgba| rgba.dimensions())
}

/// Decodes a PNG or JPEG and adds it to `doc` as an RGB image XObject. A
/// non-opaque alpha channel becomes a separate soft mask.
pub(crate) fn embed_image(doc: &mut Document, bytes: &[u8]) -> Result<ObjectId, RenderError> {
    let rgba = decode(bytes)?;
    let (width, height) = rgba.dimensions();

    let pixel_count = (width * height) as usize;
    let mut rgb = Vec::with_capacity(pixel_count * 3);
    let mut alpha = Vec::with_capacity(pixel_count);
    for px in rgba.pixels() {
        rgb.extend_from_slice(&px.0[..3]);
        alpha.push(px.0[3]);
    }

    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width as i64,
        "Height" => height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };

    if alpha.iter().any(|a| *a != 255) {
        let smask = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        };
        let smask_id = doc.add_object(Stream::new(smask, compress(&alpha)?));
        dict.set("SMask", smask_id);
    }

    Ok(doc.add_object(Stream::new(dict, compress(&rgb)?)))
}

fn compress(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
