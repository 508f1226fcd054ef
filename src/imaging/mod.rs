//! Image handling — pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` + EXIF orientation from the decoder |
//! | **Render effect** | [`RustRenderer`] per-pixel transforms (rayon) |
//! | **Share resize** | `apply_orientation` + `resize_exact` (Lanczos3) |
//! | **Encode** | `JpegEncoder` / `PngEncoder` |
//!
//! The module is split into:
//! - **Bitmap**: [`SourceImage`] and [`RenderedImage`]
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Encoding settings
//! - **Backend**: [`FilterRenderer`] trait + [`RustRenderer`]
//! - **Operations**: Resize and encode for the share path

pub mod backend;
pub mod bitmap;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, FilterRenderer};
pub use bitmap::{RenderedImage, SourceImage};
pub use calculations::calculate_share_dimensions;
pub use image::metadata::Orientation;
pub use operations::{encode, resized};
pub use params::{Quality, ShareFormat};
pub use rust_backend::RustRenderer;
