//! Pure Rust filter renderer.
//!
//! Every catalog effect is a per-pixel color transform on RGBA8 data. Alpha
//! is passed through untouched and the output has the input's dimensions.
//!
//! | Effect | Transform |
//! |---|---|
//! | `mono` | Rec. 601 luminance grayscale |
//! | `chrome` | saturation ×1.25, contrast ×1.1 |
//! | `fade` | lifted blacks, saturation ×0.7 |
//! | `instant` | lifted blacks, warm tint, saturation ×0.85 |
//! | `noir` | grayscale, contrast ×1.8 |
//! | `process` | cool shadows, warm highlights, contrast ×1.08 |
//! | `tonal` | grayscale, contrast ×0.85 |
//! | `transfer` | warm vintage channel gains, saturation ×1.1 |
//! | `sepia-tone` | classic sepia matrix |
//!
//! Pixels are processed in parallel with rayon; the call still returns only
//! once the whole bitmap is done.

use super::backend::{BackendError, FilterRenderer};
use super::bitmap::SourceImage;
use image::RgbaImage;
use rayon::prelude::*;

/// The effects this renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Mono,
    Chrome,
    Fade,
    Instant,
    Noir,
    Process,
    Tonal,
    Transfer,
    SepiaTone,
}

impl Effect {
    /// Resolve a catalog identifier. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mono" => Some(Self::Mono),
            "chrome" => Some(Self::Chrome),
            "fade" => Some(Self::Fade),
            "instant" => Some(Self::Instant),
            "noir" => Some(Self::Noir),
            "process" => Some(Self::Process),
            "tonal" => Some(Self::Tonal),
            "transfer" => Some(Self::Transfer),
            "sepia-tone" => Some(Self::SepiaTone),
            _ => None,
        }
    }
}

#[inline]
fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

#[inline]
fn saturate(r: &mut f32, g: &mut f32, b: &mut f32, amount: f32) {
    let l = luminance(*r, *g, *b);
    *r = l + (*r - l) * amount;
    *g = l + (*g - l) * amount;
    *b = l + (*b - l) * amount;
}

#[inline]
fn contrast(v: f32, amount: f32) -> f32 {
    (v - 0.5) * amount + 0.5
}

/// Apply `effect` to one normalized RGB triple in place.
#[inline]
fn apply_effect_rgb(r: &mut f32, g: &mut f32, b: &mut f32, effect: Effect) {
    match effect {
        Effect::Mono => {
            let gray = luminance(*r, *g, *b);
            (*r, *g, *b) = (gray, gray, gray);
        }

        Effect::Chrome => {
            saturate(r, g, b, 1.25);
            *r = contrast(*r, 1.1);
            *g = contrast(*g, 1.1);
            *b = contrast(*b, 1.1);
        }

        Effect::Fade => {
            *r = *r * 0.85 + 0.1;
            *g = *g * 0.85 + 0.1;
            *b = *b * 0.85 + 0.1;
            saturate(r, g, b, 0.7);
        }

        Effect::Instant => {
            *r = *r * 0.9 + 0.08;
            *g = *g * 0.9 + 0.06;
            *b = *b * 0.85 + 0.04;
            saturate(r, g, b, 0.85);
        }

        Effect::Noir => {
            let gray = contrast(luminance(*r, *g, *b), 1.8);
            (*r, *g, *b) = (gray, gray, gray);
        }

        Effect::Process => {
            let shift = (luminance(*r, *g, *b) - 0.5) * 0.12;
            *r = contrast(*r + shift, 1.08);
            *g = contrast(*g * 1.02, 1.08);
            *b = contrast(*b - shift + 0.03, 1.08);
        }

        Effect::Tonal => {
            let gray = contrast(luminance(*r, *g, *b), 0.85);
            (*r, *g, *b) = (gray, gray, gray);
        }

        Effect::Transfer => {
            *r = *r * 1.08 + 0.02;
            *g *= 1.02;
            *b *= 0.9;
            saturate(r, g, b, 1.1);
        }

        Effect::SepiaTone => {
            let (ir, ig, ib) = (*r, *g, *b);
            *r = 0.393 * ir + 0.769 * ig + 0.189 * ib;
            *g = 0.349 * ir + 0.686 * ig + 0.168 * ib;
            *b = 0.272 * ir + 0.534 * ig + 0.131 * ib;
        }
    }
    *r = r.clamp(0.0, 1.0);
    *g = g.clamp(0.0, 1.0);
    *b = b.clamp(0.0, 1.0);
}

/// Apply `effect` to a whole RGBA8 buffer, returning a new buffer.
pub fn apply_effect(pixels: &RgbaImage, effect: Effect) -> RgbaImage {
    let mut out = pixels.clone();
    out.par_chunks_exact_mut(4).for_each(|px| {
        let mut r = px[0] as f32 / 255.0;
        let mut g = px[1] as f32 / 255.0;
        let mut b = px[2] as f32 / 255.0;
        apply_effect_rgb(&mut r, &mut g, &mut b, effect);
        px[0] = (r * 255.0).round() as u8;
        px[1] = (g * 255.0).round() as u8;
        px[2] = (b * 255.0).round() as u8;
    });
    out
}

/// Pure Rust renderer for the built-in effects.
pub struct RustRenderer;

impl RustRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterRenderer for RustRenderer {
    fn render(&self, name: &str, source: &SourceImage) -> Result<RgbaImage, BackendError> {
        let effect = Effect::from_name(name)
            .ok_or_else(|| BackendError::FilterUnavailable(format!("unknown filter '{name}'")))?;
        Ok(apply_effect(source.pixels(), effect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;
    use crate::test_helpers::{gradient_source, solid_source};

    fn render_pixel(name: &str, rgba: [u8; 4]) -> [u8; 4] {
        let source = solid_source(1, 1, rgba);
        RustRenderer::new()
            .render(name, &source)
            .unwrap()
            .get_pixel(0, 0)
            .0
    }

    #[test]
    fn every_catalog_entry_is_renderable() {
        let renderer = RustRenderer::new();
        let source = gradient_source(16, 8);
        for name in CATALOG {
            let out = renderer.render(name, &source).unwrap();
            assert_eq!(out.dimensions(), (16, 8), "{name} changed dimensions");
        }
    }

    #[test]
    fn unknown_filter_is_unavailable() {
        let source = solid_source(1, 1, [1, 2, 3, 255]);
        let result = RustRenderer::new().render("CIPhotoEffectTone", &source);
        assert!(matches!(result, Err(BackendError::FilterUnavailable(_))));
    }

    #[test]
    fn mono_produces_gray() {
        let [r, g, b, a] = render_pixel("mono", [200, 100, 50, 255]);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 255);
    }

    #[test]
    fn noir_pushes_contrast() {
        let dark = render_pixel("noir", [60, 60, 60, 255]);
        let mono = render_pixel("mono", [60, 60, 60, 255]);
        assert!(dark[0] < mono[0]);
    }

    #[test]
    fn tonal_flattens_contrast() {
        let tonal = render_pixel("tonal", [0, 0, 0, 255]);
        assert!(tonal[0] > 0);
        assert_eq!(tonal[0], tonal[2]);
    }

    #[test]
    fn sepia_is_warm() {
        let [r, g, b, _] = render_pixel("sepia-tone", [100, 100, 100, 255]);
        assert!(r > g && g > b);
    }

    #[test]
    fn fade_lifts_black() {
        let [r, g, b, _] = render_pixel("fade", [0, 0, 0, 255]);
        assert!(r > 0 && g > 0 && b > 0);
    }

    #[test]
    fn alpha_is_preserved() {
        for name in CATALOG {
            assert_eq!(render_pixel(name, [90, 140, 30, 77])[3], 77, "{name}");
        }
    }
}
