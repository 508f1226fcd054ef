//! Editing session state: the presentation shell without a UI toolkit.
//!
//! A session owns the current photo, the filter cursor, the latest
//! rendering, and the one visibility flag the app has (the capture/edit
//! dialog). Every method is a discrete user action or a source resolution,
//! and every transition is listed here:
//!
//! | Action | Effect |
//! |---|---|
//! | request camera (available) | clear photo, open dialog |
//! | request camera (none) | no-op |
//! | source resolved, photo | store photo, cursor to 0, drop rendering, open dialog |
//! | source resolved, failure | close dialog if the capture opened it, otherwise no-op |
//! | apply effect (photo present) | render `CATALOG[cursor]` from the original photo |
//! | apply effect (no photo) | no-op |
//! | share | resized copy of whatever is displayed |
//! | close | close dialog; the photo stays |
//!
//! Filters never chain: each effect starts again from the original photo.

use crate::catalog::FilterCursor;
use crate::imaging::{BackendError, FilterRenderer, RenderedImage, SourceImage, resized};
use crate::pipeline::{PipelineError, apply_next_filter};
use crate::share::ShareItem;
use crate::source::{SourceError, SourceResult};
use tracing::{debug, info, warn};

/// What happened when the user pressed "effect".
#[derive(Debug)]
pub enum EffectOutcome {
    /// Rendered with this catalog filter.
    Applied(&'static str),
    /// No photo yet; nothing changed.
    NoSource,
    /// The filter failed; the previous rendering is still shown.
    Failed(PipelineError),
}

/// State for one capture/edit session.
#[derive(Debug, Default)]
pub struct Session {
    capture_dialog_visible: bool,
    source: Option<SourceImage>,
    cursor: FilterCursor,
    rendered: Option<RenderedImage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture_dialog_visible(&self) -> bool {
        self.capture_dialog_visible
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn cursor(&self) -> FilterCursor {
        self.cursor
    }

    pub fn rendered(&self) -> Option<&RenderedImage> {
        self.rendered.as_ref()
    }

    /// Open the capture dialog for a new photo.
    ///
    /// Returns `false` and leaves state untouched when there is no camera.
    pub fn request_camera(&mut self, camera_available: bool) -> bool {
        if !camera_available {
            warn!("camera requested but none is available");
            return false;
        }
        self.source = None;
        self.rendered = None;
        self.capture_dialog_visible = true;
        debug!("capture dialog opened");
        true
    }

    /// Apply a resolved camera capture or library pick.
    pub fn source_resolved(&mut self, result: SourceResult) -> Result<(), SourceError> {
        match result {
            Ok(image) => {
                info!(
                    width = image.width(),
                    height = image.height(),
                    "photo ready, entering edit mode"
                );
                self.source = Some(image);
                self.cursor = FilterCursor::default();
                self.rendered = None;
                self.capture_dialog_visible = true;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "no photo from source");
                // A cancelled capture closes its dialog; an open edit
                // session for an earlier photo stays as it was.
                if self.source.is_none() {
                    self.capture_dialog_visible = false;
                }
                Err(e)
            }
        }
    }

    /// The "effect" action: render the next catalog filter from the
    /// original photo.
    ///
    /// On failure the previous rendering stays, and the cursor still moves
    /// past the broken filter so the next press tries the following one.
    pub fn apply_effect(&mut self, renderer: &impl FilterRenderer) -> EffectOutcome {
        let Some(source) = self.source.as_ref() else {
            debug!("effect pressed with no photo");
            return EffectOutcome::NoSource;
        };
        match apply_next_filter(renderer, source, self.cursor) {
            Ok((rendered, next)) => {
                let name = rendered.filter();
                info!(filter = name, next = %next, "effect applied");
                self.rendered = Some(rendered);
                self.cursor = next;
                EffectOutcome::Applied(name)
            }
            Err(e) => {
                warn!(error = %e, "effect failed");
                self.cursor = e.next_cursor();
                EffectOutcome::Failed(e)
            }
        }
    }

    /// Share what the edit dialog displays: the latest rendering, or the
    /// unfiltered photo before any effect was applied.
    ///
    /// `Ok(None)` when there is no photo; an error when the photo cannot be
    /// scaled to `width` (see [`resized`]).
    pub fn share_item(&self, title: &str, width: u32) -> Result<Option<ShareItem>, BackendError> {
        let Some(rendered) = &self.rendered else {
            return self.share_source_item(title, width);
        };
        let pixels = resized(rendered.pixels(), rendered.orientation(), width)?;
        Ok(Some(ShareItem {
            title: title.to_string(),
            pixels,
            filter: Some(rendered.filter()),
        }))
    }

    /// Share the unfiltered photo, as the main screen does.
    pub fn share_source_item(
        &self,
        title: &str,
        width: u32,
    ) -> Result<Option<ShareItem>, BackendError> {
        self.source
            .as_ref()
            .map(|source| {
                resized(source.pixels(), source.orientation(), width).map(|pixels| ShareItem {
                    title: title.to_string(),
                    pixels,
                    filter: None,
                })
            })
            .transpose()
    }

    /// Close the dialog. The photo is kept for sharing from the main screen.
    pub fn close(&mut self) {
        self.capture_dialog_visible = false;
        debug!("dialog closed");
    }
}
