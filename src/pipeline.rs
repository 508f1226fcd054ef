//! The filter pipeline: apply the catalog entry under the cursor to a
//! source image and hand back the rendering plus the advanced cursor.
//!
//! The pipeline holds no state. The caller owns the cursor and always passes
//! the original [`SourceImage`], so a rendering is never fed back in and
//! filters never stack.

use crate::catalog::FilterCursor;
use crate::imaging::{BackendError, FilterRenderer, RenderedImage, SourceImage};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Filter '{name}' unavailable: {source}")]
    FilterUnavailable {
        name: &'static str,
        /// Cursor position after the failed entry.
        next: FilterCursor,
        #[source]
        source: BackendError,
    },
}

impl PipelineError {
    /// Cursor position past the entry that failed.
    pub fn next_cursor(&self) -> FilterCursor {
        match self {
            Self::FilterUnavailable { next, .. } => *next,
        }
    }
}

/// Apply `CATALOG[cursor]` to `source`.
///
/// Returns the rendering (carrying the source's orientation) and
/// `cursor.next()`. A renderer error, or output whose size does not match the
/// source, is reported as [`PipelineError::FilterUnavailable`].
pub fn apply_next_filter(
    renderer: &impl FilterRenderer,
    source: &SourceImage,
    cursor: FilterCursor,
) -> Result<(RenderedImage, FilterCursor), PipelineError> {
    let name = cursor.filter_name();
    let next = cursor.next();

    let unavailable = |err: BackendError| PipelineError::FilterUnavailable {
        name,
        next,
        source: err,
    };

    let pixels = renderer.render(name, source).map_err(unavailable)?;
    if pixels.dimensions() != source.pixels().dimensions() {
        return Err(unavailable(BackendError::FilterUnavailable(format!(
            "renderer returned {}x{} for a {}x{} source",
            pixels.width(),
            pixels.height(),
            source.width(),
            source.height()
        ))));
    }

    debug!(filter = name, cursor = cursor.index(), next = next.index(), "applied filter");
    Ok((RenderedImage::new(pixels, source.orientation(), name), next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;
    use crate::imaging::Orientation;
    use crate::imaging::backend::tests::MockRenderer;
    use crate::test_helpers::{oriented_source, solid_source};

    #[test]
    fn next_cursor_wraps_for_every_position() {
        let renderer = MockRenderer::new();
        let source = solid_source(2, 2, [5, 5, 5, 255]);
        for c in 0..CATALOG.len() {
            let cursor = FilterCursor::new(c).unwrap();
            let (rendered, next) = apply_next_filter(&renderer, &source, cursor).unwrap();
            assert_eq!(next.index(), (c + 1) % 9);
            assert_eq!(rendered.filter(), CATALOG[c]);
        }
    }

    #[test]
    fn last_cursor_wraps_to_zero() {
        let renderer = MockRenderer::new();
        let source = solid_source(2, 2, [5, 5, 5, 255]);
        let (rendered, next) =
            apply_next_filter(&renderer, &source, FilterCursor::new(8).unwrap()).unwrap();
        assert_eq!(next.index(), 0);
        assert_eq!(rendered.filter(), "sepia-tone");
    }

    #[test]
    fn orientation_is_preserved() {
        let renderer = MockRenderer::new();
        let source = oriented_source(Orientation::Rotate270);
        let (rendered, _) = apply_next_filter(&renderer, &source, FilterCursor::default()).unwrap();
        assert_eq!(rendered.orientation(), Orientation::Rotate270);
    }

    #[test]
    fn repeated_application_starts_from_original() {
        let renderer = MockRenderer::new();
        let source = solid_source(3, 3, [42, 0, 0, 255]);

        let (first, cursor) =
            apply_next_filter(&renderer, &source, FilterCursor::default()).unwrap();
        let (second, _) = apply_next_filter(&renderer, &source, cursor).unwrap();

        // Mock stamps the call number into the first pixel; each input was
        // still the untouched original.
        assert_eq!(first.pixels().get_pixel(0, 0).0[0], 1);
        assert_eq!(second.pixels().get_pixel(0, 0).0[0], 2);
        let calls = renderer.calls.borrow();
        assert!(calls.iter().all(|c| c.input_first_pixel == [42, 0, 0, 255]));
    }

    #[test]
    fn renderer_failure_is_filter_unavailable() {
        let renderer = MockRenderer::with_broken(vec!["chrome"]);
        let source = solid_source(2, 2, [0, 0, 0, 255]);
        let err = apply_next_filter(&renderer, &source, FilterCursor::new(1).unwrap()).unwrap_err();
        assert!(matches!(err, PipelineError::FilterUnavailable { name: "chrome", .. }));
        assert_eq!(err.next_cursor().index(), 2);
    }

    #[test]
    fn size_mismatch_is_filter_unavailable() {
        let renderer = MockRenderer {
            wrong_size: true,
            ..MockRenderer::default()
        };
        let source = solid_source(4, 4, [0, 0, 0, 255]);
        let result = apply_next_filter(&renderer, &source, FilterCursor::default());
        assert!(matches!(result, Err(PipelineError::FilterUnavailable { .. })));
    }
}
