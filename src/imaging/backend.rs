//! Named-filter rendering trait and shared types.
//!
//! The [`FilterRenderer`] trait is the one capability the filter pipeline
//! calls into: given a catalog identifier and a source bitmap, produce the
//! filtered pixels or fail.
//!
//! The production implementation is
//! [`RustRenderer`](super::rust_backend::RustRenderer), which implements
//! every catalog effect in pure Rust.

use super::bitmap::SourceImage;
use image::RgbaImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Filter unavailable: {0}")]
    FilterUnavailable(String),
    #[error("Decode failed: {0}")]
    DecodeFailure(String),
    #[error("Encode failed: {0}")]
    EncodeFailure(String),
    #[error("Output too large: {width}x{height}")]
    TooLarge { width: u32, height: u32 },
}

/// Trait for named-filter renderers.
///
/// Identifiers are passed verbatim from the
/// [`CATALOG`](crate::catalog::CATALOG). A renderer that does not know a name
/// must return [`BackendError::FilterUnavailable`] rather than guess.
pub trait FilterRenderer {
    /// Render `name` against `source`. Output dimensions must equal the
    /// source dimensions.
    fn render(&self, name: &str, source: &SourceImage) -> Result<RgbaImage, BackendError>;
}
