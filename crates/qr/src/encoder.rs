use crate::{ErrorCorrection, QrEncoder, QrError, QrImage, QrOptions, QrOutcome};
use qrcode::{EcLevel, QrCode};

/// Encoder backed by the `qrcode` crate, writing black modules on an opaque
/// white background.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeEncoder {
    options: QrOptions,
}

impl QrCodeEncoder {
    pub fn new(options: QrOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &QrOptions {
        &self.options
    }

    fn generate(&self, data: &str) -> Result<QrImage, QrError> {
        let ec_level = match self.options.error_correction {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        };

        let code = QrCode::with_error_correction_level(data, ec_level)
            .map_err(|e| QrError::Encode(e.to_string()))?;

        let qr_width = code.width();
        let module_count = qr_width + (self.options.quiet_zone as usize * 2);

        // Whole pixels per module keeps edges crisp; the image may come out
        // slightly smaller than requested.
        let module_size = (self.options.size_px as usize / module_count).max(1);
        let actual_size = (module_count * module_size) as u32;

        let mut img = image::RgbaImage::from_pixel(actual_size, actual_size, image::Rgba([255, 255, 255, 255]));

        let quiet_px = self.options.quiet_zone as usize * module_size;
        for (y, row) in code.to_colors().chunks(qr_width).enumerate() {
            for (x, &module) in row.iter().enumerate() {
                if module != qrcode::Color::Dark {
                    continue;
                }
                let start_x = quiet_px + x * module_size;
                let start_y = quiet_px + y * module_size;
                for dy in 0..module_size {
                    for dx in 0..module_size {
                        img.put_pixel((start_x + dx) as u32, (start_y + dy) as u32, image::Rgba([0, 0, 0, 255]));
                    }
                }
            }
        }

        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| QrError::Png(e.to_string()))?;

        Ok(QrImage {
            png,
            size_px: actual_size,
        })
    }
}

impl QrEncoder for QrCodeEncoder {
    fn is_available(&self) -> bool {
        true
    }

    fn encode(&self, payload: &str) -> QrOutcome {
        match self.generate(payload) {
            Ok(image) => QrOutcome::Encoded(image),
            Err(e) => {
                log::warn!("QR encoding failed, footer will be text-only: {}", e);
                QrOutcome::NoImage { reason: e.to_string() }
            }
        }
    }
}
