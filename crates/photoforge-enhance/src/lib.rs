//! # photoforge-enhance
//!
//! Image enhancement pipeline: decode raw bytes, apply a fixed ordered
//! sequence of adjustments (contrast, sharpness, brightness, saturation),
//! and re-encode in the source format.
//!
//! The pipeline is a pure transform over bytes: no state is retained
//! between calls and identical input always produces identical output.
//! Saturation is skipped for images whose source color model is CMYK,
//! where the adjustment is not defined.
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use photoforge_enhance::{Enhancer, EnhanceSettings};
//!
//! let enhancer = Enhancer::new(EnhanceSettings::default());
//! let input = std::fs::read("photo.jpg")?;
//! let output = enhancer.process(&input)?;
//! std::fs::write("photo_enhanced.jpg", output)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::Cursor;

use image::{DynamicImage, ExtendedColorType, ImageDecoder, ImageFormat, ImageReader, RgbaImage};

mod error;
mod ops;
mod settings;

// Re-exports
pub use error::{Error, Result};
pub use settings::EnhanceSettings;

/// Encoding format used when the source format cannot be determined.
const FALLBACK_FORMAT: ImageFormat = ImageFormat::Jpeg;

/// Applies the enhancement pipeline to raw image bytes.
pub struct Enhancer {
    settings: EnhanceSettings,
}

impl Enhancer {
    /// Create a new `Enhancer` with the given settings.
    pub fn new(settings: EnhanceSettings) -> Self {
        Self { settings }
    }

    /// Decode `data`, enhance it, and re-encode it in its source format.
    ///
    /// The output keeps the input's container format (a PNG stays a PNG);
    /// JPEG output is encoded without an alpha channel since the encoder
    /// does not accept one.
    pub fn process(&self, data: &[u8]) -> Result<Vec<u8>> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| Error::Decode(image::ImageError::IoError(e)))?;

        let format = reader.format().unwrap_or(FALLBACK_FORMAT);
        let decoder = reader.into_decoder().map_err(Error::Decode)?;
        // The decoded buffer is always RGB-like, but the decoder still
        // reports the source color model, which decides the saturation skip.
        let source_color = decoder.original_color_type();
        let img = DynamicImage::from_decoder(decoder).map_err(Error::Decode)?;

        let mut rgba = img.into_rgba8();
        apply_operations(&mut rgba, &self.settings, is_cmyk(source_color));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            ?format,
            ?source_color,
            width = rgba.width(),
            height = rgba.height(),
            "enhanced image"
        );

        encode(rgba, format)
    }
}

/// Apply the fixed adjustment sequence to the working buffer.
///
/// Order matters and matches the documented contract: contrast, sharpness,
/// brightness, then saturation. Saturation is skipped for CMYK sources.
fn apply_operations(img: &mut RgbaImage, settings: &EnhanceSettings, cmyk_source: bool) {
    ops::adjust_contrast(img, settings.contrast);
    ops::adjust_sharpness(img, settings.sharpness);
    ops::adjust_brightness(img, settings.brightness);
    if !cmyk_source {
        ops::adjust_color(img, settings.color);
    }
}

fn is_cmyk(color: ExtendedColorType) -> bool {
    matches!(color, ExtendedColorType::Cmyk8)
}

fn encode(rgba: RgbaImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    let result = match format {
        // The JPEG encoder rejects alpha, so drop it.
        ImageFormat::Jpeg => {
            DynamicImage::ImageRgba8(rgba)
                .into_rgb8()
                .write_to(&mut out, format)
        }
        _ => DynamicImage::ImageRgba8(rgba).write_to(&mut out, format),
    };
    result.map_err(Error::Encode)?;
    Ok(out.into_inner())
}
