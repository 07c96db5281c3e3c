//! Image resampling with a quality-preserving filter.
//!
//! All scaling goes through Lanczos3, which handles enlargement as well as
//! reduction without the artifacts cheaper filters introduce. The scale
//! factor is derived from the target height relative to the source and
//! applied uniformly on both axes (aspect fixed at 1:1), matching how the
//! logical sizes in an icon manifest are meant to be interpreted.

use crate::error::{Error, Result};
use crate::geometry::TargetDimensions;
use image::{DynamicImage, RgbaImage, imageops::FilterType};

/// Resamples `source` to the exact pixel dimensions of `target`.
///
/// The output raster's reported size always equals the rounded integer
/// target on both axes, for enlargement and reduction alike. Resampling is
/// deterministic: identical source bytes and an identical target always
/// produce the same pixels.
pub fn scale_to_dimensions(source: &DynamicImage, target: TargetDimensions) -> Result<RgbaImage> {
    let width = target.pixel_width();
    let height = target.pixel_height();

    if width == 0 || height == 0 {
        return Err(Error::Resample {
            width,
            height,
            reason: "target rounds to zero pixels".to_string(),
        });
    }
    if source.width() == 0 || source.height() == 0 {
        return Err(Error::Resample {
            width,
            height,
            reason: "source image has no pixel data".to_string(),
        });
    }

    log::debug!(
        "Resampling {}x{} -> {}x{} (factor {:.3})",
        source.width(),
        source.height(),
        width,
        height,
        target.height() / source.height() as f64
    );

    let resized = source.resize_exact(width, height, FilterType::Lanczos3);
    Ok(resized.to_rgba8())
}

/// Center-crops a raster to a square of its shorter side.
///
/// A no-op for sources that are already square.
pub fn crop_square(source: &DynamicImage) -> DynamicImage {
    let side = source.width().min(source.height());
    if side == source.width() && side == source.height() {
        return source.clone();
    }

    let x = (source.width() - side) / 2;
    let y = (source.height() - side) / 2;
    log::debug!(
        "Cropping {}x{} to centered {side}x{side}",
        source.width(),
        source.height()
    );
    source.crop_imm(x, y, side, side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ScaleFactor, TargetDimensions};
    use image::RgbaImage;

    fn checkerboard(side: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(side, side, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgba([255, 255, 255, 255])
            } else {
                image::Rgba([0, 0, 0, 255])
            }
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_reduction_exact_dimensions() {
        let source = checkerboard(400);
        let target = TargetDimensions::from_size_string("20x20", ScaleFactor::IDENTITY).unwrap();
        let out = scale_to_dimensions(&source, target).unwrap();
        assert_eq!((out.width(), out.height()), (20, 20));
    }

    #[test]
    fn test_enlargement_exact_dimensions() {
        let source = checkerboard(16);
        let target =
            TargetDimensions::from_size_string("64x64", ScaleFactor::parse("2x").unwrap()).unwrap();
        let out = scale_to_dimensions(&source, target).unwrap();
        assert_eq!((out.width(), out.height()), (128, 128));
    }

    #[test]
    fn test_fractional_target_rounds() {
        let source = checkerboard(100);
        let target = TargetDimensions::new(19.5, 19.5).unwrap();
        let out = scale_to_dimensions(&source, target).unwrap();
        assert_eq!((out.width(), out.height()), (20, 20));
    }

    #[test]
    fn test_deterministic() {
        let source = checkerboard(64);
        let target = TargetDimensions::from_size_string("30x30", ScaleFactor::IDENTITY).unwrap();
        let a = scale_to_dimensions(&source, target).unwrap();
        let b = scale_to_dimensions(&source, target).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_crop_square_centered() {
        let source = DynamicImage::ImageRgba8(RgbaImage::new(400, 300));
        let cropped = crop_square(&source);
        assert_eq!((cropped.width(), cropped.height()), (300, 300));
    }

    #[test]
    fn test_crop_square_noop_for_square() {
        let source = checkerboard(32);
        let cropped = crop_square(&source);
        assert_eq!((cropped.width(), cropped.height()), (32, 32));
    }
}
