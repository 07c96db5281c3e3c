//! Source image loading.
//!
//! The core pipeline only ever sees an already-decoded raster; this module
//! is the boundary that produces one from a PNG or JPEG file on disk.

use crate::error::{Error, Result};
use image::DynamicImage;
use std::path::Path;

/// Decodes a source image file into an in-memory raster.
///
/// Accepts anything the `image` crate can sniff, which covers the PNG and
/// JPEG inputs the tool documents. The returned image is read-only for the
/// rest of the pipeline; resampling works on derived copies.
pub fn load_source_image(path: &Path) -> Result<DynamicImage> {
    let img = image::open(path).map_err(|error| Error::SourceImageUnreadable {
        path: path.to_path_buf(),
        error,
    })?;

    log::debug!(
        "Loaded source image: {}x{} from {}",
        img.width(),
        img.height(),
        path.display()
    );

    Ok(img)
}

/// Whether the raster is square (width == height).
///
/// Icon sets are generated from square sources; non-square input still
/// works but should be cropped first for predictable results.
pub fn is_square(image: &DynamicImage) -> bool {
    image.width() == image.height()
}
