//! Shared test utilities for the snapfx test suite.
//!
//! Synthetic bitmaps and encoded fixtures, built in memory so no test depends
//! on files shipped with the repository.

use crate::imaging::{Orientation, SourceImage};
use image::{ImageEncoder, RgbaImage};
use std::path::Path;

// =========================================================================
// Bitmaps
// =========================================================================

/// A deterministic RGBA gradient, distinct per pixel for small sizes.
pub fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    })
}

pub fn gradient_source(width: u32, height: u32) -> SourceImage {
    SourceImage::new(gradient(width, height), Orientation::NoTransforms).unwrap()
}

/// A single-color source image.
pub fn solid_source(width: u32, height: u32, rgba: [u8; 4]) -> SourceImage {
    let pixels = RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    SourceImage::new(pixels, Orientation::NoTransforms).unwrap()
}

/// A small source carrying the given orientation metadata.
pub fn oriented_source(orientation: Orientation) -> SourceImage {
    SourceImage::new(gradient(6, 4), orientation).unwrap()
}

// =========================================================================
// Encoded fixtures
// =========================================================================

pub fn encode_png(pixels: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(
            pixels.as_raw(),
            pixels.width(),
            pixels.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
    buf
}

/// Write a gradient PNG of the given size to `path`.
pub fn write_png(path: &Path, width: u32, height: u32) {
    std::fs::write(path, encode_png(&gradient(width, height))).unwrap();
}

/// Encode `pixels` as JPEG with an EXIF block whose Orientation tag is
/// `orientation` (1-8), the way cameras record sensor rotation.
pub fn encode_jpeg_with_orientation(pixels: &RgbaImage, orientation: u8) -> Vec<u8> {
    let rgb = image::DynamicImage::ImageRgba8(pixels.clone()).to_rgb8();
    let mut jpeg = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, 90)
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();

    // Little-endian TIFF header, one IFD with a single SHORT entry 0x0112.
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II\x2a\x00");
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x0112u16.to_le_bytes());
    tiff.extend_from_slice(&3u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&u32::from(orientation).to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());

    let mut app1 = vec![0xFF, 0xE1];
    let len = (2 + 6 + tiff.len()) as u16;
    app1.extend_from_slice(&len.to_be_bytes());
    app1.extend_from_slice(b"Exif\0\0");
    app1.extend_from_slice(&tiff);

    // APP1 goes right after SOI.
    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&app1);
    out.extend_from_slice(&jpeg[2..]);
    out
}
