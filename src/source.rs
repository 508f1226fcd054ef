//! Image source providers: camera capture and photo-library import.
//!
//! Both sources are user-interactive and may take arbitrarily long, so they
//! never hand back a bitmap directly. Each request returns a [`PendingImage`],
//! a single-shot result that resolves exactly once to a [`SourceImage`] or to
//! a [`SourceError`]. The caller either polls it, waits on it, or asks for a
//! callback on resolution.
//!
//! ## Desktop implementation
//!
//! [`DesktopSource`] is what the binary uses:
//!
//! | Request | Behavior |
//! |---|---|
//! | camera | runs the configured capture command, decodes its stdout |
//! | library | reads the selected file, decodes its bytes |
//!
//! Work happens on a worker thread; the result comes back over a channel.

use crate::imaging::{BackendError, SourceImage};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SourceError {
    /// No camera, user cancelled, or the transfer failed.
    #[error("Source unavailable: {0}")]
    Unavailable(String),
    /// Bytes arrived but are not a decodable bitmap.
    #[error("Decode failed: {0}")]
    DecodeFailure(String),
}

impl From<BackendError> for SourceError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::DecodeFailure(msg) => Self::DecodeFailure(msg),
            other => Self::Unavailable(other.to_string()),
        }
    }
}

pub type SourceResult = Result<SourceImage, SourceError>;

/// A single-shot pending bitmap.
pub struct PendingImage {
    rx: Receiver<SourceResult>,
}

impl PendingImage {
    /// A pending result plus the sender that completes it.
    pub fn channel() -> (Sender<SourceResult>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }

    /// An already-resolved result.
    pub fn ready(result: SourceResult) -> Self {
        let (tx, pending) = Self::channel();
        // Receiver is alive in `pending`, so the send cannot fail.
        let _ = tx.send(result);
        pending
    }

    /// Run `work` on a worker thread and resolve with its result.
    pub fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> SourceResult + Send + 'static,
    {
        let (tx, pending) = Self::channel();
        std::thread::spawn(move || {
            // The requester may have dropped the pending image (dialog closed).
            let _ = tx.send(work());
        });
        pending
    }

    /// Non-blocking check. `None` while the source is still working.
    ///
    /// A sender dropped without a result resolves to
    /// [`SourceError::Unavailable`].
    pub fn try_resolve(&self) -> Option<SourceResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(dropped())),
        }
    }

    /// Block until the source resolves.
    pub fn wait(self) -> SourceResult {
        self.rx.recv().unwrap_or_else(|_| Err(dropped()))
    }

    /// Call `f` with the result once it arrives, from a helper thread.
    pub fn on_resolve<F>(self, f: F)
    where
        F: FnOnce(SourceResult) + Send + 'static,
    {
        std::thread::spawn(move || f(self.wait()));
    }
}

fn dropped() -> SourceError {
    SourceError::Unavailable("source finished without a result".into())
}

/// Camera and photo-library capability.
pub trait ImageSource {
    /// Whether a camera exists at all. Checked before a capture dialog opens.
    fn is_camera_available(&self) -> bool;

    /// Take a photo with the camera.
    fn capture_from_camera(&self) -> PendingImage;

    /// Import the library item the user selected.
    fn pick_from_library(&self, selection: &Path) -> PendingImage;
}

/// Camera via an external capture command; library via the filesystem.
#[derive(Debug, Clone)]
pub struct DesktopSource {
    camera_command: Vec<String>,
}

impl DesktopSource {
    /// `camera_command` is an argv that writes one encoded still to stdout.
    /// An empty command means no camera.
    pub fn new(camera_command: Vec<String>) -> Self {
        Self { camera_command }
    }
}

impl ImageSource for DesktopSource {
    fn is_camera_available(&self) -> bool {
        self.camera_command
            .first()
            .is_some_and(|program| find_program(program).is_some())
    }

    fn capture_from_camera(&self) -> PendingImage {
        if !self.is_camera_available() {
            return PendingImage::ready(Err(SourceError::Unavailable(
                "no camera available".into(),
            )));
        }
        let argv = self.camera_command.clone();
        PendingImage::spawn(move || capture_with_command(&argv))
    }

    fn pick_from_library(&self, selection: &Path) -> PendingImage {
        let path = selection.to_path_buf();
        PendingImage::spawn(move || load_from_library(&path))
    }
}

fn capture_with_command(argv: &[String]) -> SourceResult {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| SourceError::Unavailable("empty camera command".into()))?;
    debug!(program = %program, ?args, "running capture command");
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| SourceError::Unavailable(format!("failed to run {program}: {e}")))?;
    if !output.status.success() {
        return Err(SourceError::Unavailable(format!(
            "{program} exited with {}",
            output.status
        )));
    }
    if output.stdout.is_empty() {
        return Err(SourceError::Unavailable(format!("{program} produced no image")));
    }
    Ok(SourceImage::decode(&output.stdout)?)
}

fn load_from_library(path: &Path) -> SourceResult {
    let bytes = std::fs::read(path)
        .map_err(|e| SourceError::Unavailable(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read library item");
    Ok(SourceImage::decode(&bytes)?)
}

/// Resolve `program` the way a shell would: paths are checked directly,
/// bare names are searched on `PATH`.
fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(program))
        .find(|p| p.is_file())
}
