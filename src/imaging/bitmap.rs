//! In-memory bitmaps passed between the source providers, the filter
//! pipeline, and the share target.
//!
//! Both types own RGBA8 pixels plus the EXIF orientation the camera or file
//! reported. Pixels are stored as decoded (unrotated); orientation is only
//! applied when a bitmap leaves the app through
//! [`operations::resized`](super::operations::resized).

use super::backend::BackendError;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader, RgbaImage};
use std::io::Cursor;

/// A captured or imported photo. Never mutated once built; a new capture
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pixels: RgbaImage,
    orientation: Orientation,
}

impl SourceImage {
    /// Wrap already-decoded pixels. Empty bitmaps are rejected.
    pub fn new(pixels: RgbaImage, orientation: Orientation) -> Result<Self, BackendError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(BackendError::DecodeFailure(format!(
                "empty bitmap ({}x{})",
                pixels.width(),
                pixels.height()
            )));
        }
        Ok(Self {
            pixels,
            orientation,
        })
    }

    /// Decode raw encoded bytes (JPEG, PNG, TIFF, WebP) into a bitmap,
    /// keeping the EXIF orientation the encoder recorded.
    pub fn decode(bytes: &[u8]) -> Result<Self, BackendError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(BackendError::Io)?;
        let mut decoder = reader
            .into_decoder()
            .map_err(|e| BackendError::DecodeFailure(e.to_string()))?;
        // A broken EXIF block should not cost us the photo.
        let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
        let img = DynamicImage::from_decoder(decoder)
            .map_err(|e| BackendError::DecodeFailure(e.to_string()))?;
        Self::new(img.into_rgba8(), orientation)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// The output of exactly one catalog filter applied to a [`SourceImage`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImage {
    pixels: RgbaImage,
    orientation: Orientation,
    filter: &'static str,
}

impl RenderedImage {
    pub fn new(pixels: RgbaImage, orientation: Orientation, filter: &'static str) -> Self {
        Self {
            pixels,
            orientation,
            filter,
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Catalog identifier of the filter that produced this rendering.
    pub fn filter(&self) -> &'static str {
        self.filter
    }
}
