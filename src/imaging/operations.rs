//! High-level image operations for the share path.
//!
//! These combine the pure [`calculations`](super::calculations) with the
//! `image` crate: orient the pixels the way the camera meant them, scale to
//! the share width, and encode.

use super::backend::BackendError;
use super::calculations::calculate_share_dimensions;
use super::params::{Quality, ShareFormat};
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, RgbaImage};
use std::io::Write;

/// Largest share output, in pixels: 1024 wide by 16384 tall.
pub const MAX_SHARE_PIXELS: u64 = 1024 * 16_384;

/// Apply `orientation`, then scale so the width is exactly `target_width`
/// while preserving aspect ratio.
///
/// Very narrow, tall photos would scale past [`MAX_SHARE_PIXELS`]; those
/// fail with [`BackendError::TooLarge`] before anything is allocated.
pub fn resized(
    pixels: &RgbaImage,
    orientation: Orientation,
    target_width: u32,
) -> Result<RgbaImage, BackendError> {
    let shown = oriented_dimensions(pixels, orientation);
    let (w, h) = calculate_share_dimensions(shown, target_width);
    if u64::from(w) * u64::from(h) > MAX_SHARE_PIXELS {
        return Err(BackendError::TooLarge {
            width: w,
            height: h,
        });
    }
    let mut img = DynamicImage::ImageRgba8(pixels.clone());
    img.apply_orientation(orientation);
    Ok(img.resize_exact(w, h, FilterType::Lanczos3).into_rgba8())
}

/// Dimensions after `orientation` is applied: quarter turns swap the axes.
fn oriented_dimensions(pixels: &RgbaImage, orientation: Orientation) -> (u32, u32) {
    let (w, h) = pixels.dimensions();
    match orientation {
        Orientation::Rotate90
        | Orientation::Rotate270
        | Orientation::Rotate90FlipH
        | Orientation::Rotate270FlipH => (h, w),
        _ => (w, h),
    }
}

/// Encode `pixels` into `writer` using the given container.
///
/// JPEG has no alpha channel, so alpha is dropped for that format.
pub fn encode<W: Write>(
    pixels: &RgbaImage,
    format: ShareFormat,
    quality: Quality,
    writer: W,
) -> Result<(), BackendError> {
    let img = DynamicImage::ImageRgba8(pixels.clone());
    let result = match format {
        ShareFormat::Jpeg => {
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality.value() as u8);
            DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)
        }
        ShareFormat::Png => {
            let encoder = image::codecs::png::PngEncoder::new(writer);
            img.write_with_encoder(encoder)
        }
    };
    result.map_err(|e| BackendError::EncodeFailure(format!("{format:?} encode failed: {e}")))
}
