//! PNG serialization.
//!
//! Encoding is a pure function from an in-memory raster to bytes; putting
//! those bytes on disk is the [`crate::sink`] module's job so the encoder
//! can be exercised without a filesystem.

use crate::error::{Error, Result};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

/// Encodes a raster as PNG at lossless best-compression settings.
///
/// Settings are fixed, so the same input pixels always yield the same
/// bytes. Fails with an `Encode` error if the buffer cannot be serialized.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, FilterType::Adaptive);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(Error::Encode)?;
    Ok(bytes)
}
