//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate share dimensions: width becomes exactly `target_width`, height
/// follows the source aspect ratio.
///
/// Both larger and smaller sources are scaled, so a 512px-wide photo is
/// upscaled to the target. Height never drops below 1.
///
/// # Examples
/// ```
/// # use snapfx::imaging::calculate_share_dimensions;
/// // 4:3 landscape → 1024x768
/// assert_eq!(calculate_share_dimensions((4032, 3024), 1024), (1024, 768));
///
/// // 3:4 portrait → 1024x1365
/// assert_eq!(calculate_share_dimensions((3024, 4032), 1024), (1024, 1365));
/// ```
pub fn calculate_share_dimensions(source: (u32, u32), target_width: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    let rate = target_width as f64 / src_w as f64;
    let h = (src_h as f64 * rate).round().max(1.0) as u32;
    (target_width, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downscale_landscape() {
        assert_eq!(calculate_share_dimensions((2048, 1536), 1024), (1024, 768));
    }

    #[test]
    fn upscale_small_image() {
        assert_eq!(calculate_share_dimensions((512, 256), 1024), (1024, 512));
    }

    #[test]
    fn square_stays_square() {
        assert_eq!(calculate_share_dimensions((300, 300), 1024), (1024, 1024));
    }

    #[test]
    fn width_is_always_exact() {
        for w in [1, 3, 7, 640, 1023, 1024, 1025, 4000, 12_345] {
            for h in [1, 2, 480, 5000] {
                let (out_w, out_h) = calculate_share_dimensions((w, h), 1024);
                assert_eq!(out_w, 1024);
                let expected = (h as f64 * 1024.0 / w as f64).round().max(1.0) as u32;
                assert_eq!(out_h, expected, "{w}x{h}");
            }
        }
    }

    #[test]
    fn extreme_panorama_keeps_one_row() {
        assert_eq!(calculate_share_dimensions((100_000, 10), 1024), (1024, 1));
    }
}
