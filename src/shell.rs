//! Interactive shell: the single-threaded event loop around a [`Session`].
//!
//! User commands and source resolutions arrive as [`Event`]s on one channel
//! and are handled strictly in order on the thread that owns the [`Shell`].
//! Camera and library requests run elsewhere; their results are posted back
//! into the same channel, tagged with the request they answer. Closing the
//! dialog forgets the outstanding request, so a result that shows up later is
//! dropped instead of reopening the editor.
//!
//! ```text
//! stdin ─▶ Command ─┐
//!                   ├─▶ mpsc ─▶ Shell::handle ─▶ Session ─▶ Report
//! source ─▶ Result ─┘
//! ```

use crate::catalog::FilterCursor;
use crate::imaging::{BackendError, FilterRenderer};
use crate::session::{EffectOutcome, Session};
use crate::share::{ShareItem, ShareTarget};
use crate::source::{ImageSource, PendingImage, SourceResult};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use tracing::{debug, warn};

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Camera,
    Library(PathBuf),
    Effect,
    /// Share what the edit dialog shows.
    Share,
    /// Share the unfiltered photo.
    ShareOriginal,
    Close,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let command = match word {
            "" => return Ok(None),
            "camera" => Self::Camera,
            "library" if rest.is_empty() => return Err("usage: library <path>".into()),
            "library" => Self::Library(PathBuf::from(rest)),
            "effect" => Self::Effect,
            "share" if rest == "original" => Self::ShareOriginal,
            "share" => Self::Share,
            "close" => Self::Close,
            "status" => Self::Status,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(Some(command))
    }
}

/// Everything the loop reacts to.
#[derive(Debug)]
pub enum Event {
    Command(Command),
    SourceResolved { request: u64, result: SourceResult },
}

/// Snapshot of session state for the `status` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub dialog_visible: bool,
    pub photo: Option<(u32, u32)>,
    pub cursor: FilterCursor,
    pub rendered_with: Option<&'static str>,
    pub waiting: bool,
}

/// Outcome of handling one event, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    CaptureStarted,
    CameraUnavailable,
    PickStarted(PathBuf),
    PhotoReady { width: u32, height: u32 },
    SourceFailed(String),
    /// A result arrived for a request that was closed or superseded.
    Discarded,
    Applied { filter: &'static str, next: FilterCursor },
    NoPhoto,
    EffectFailed(String),
    Shared(PathBuf),
    NothingToShare,
    ShareFailed(String),
    Closed,
    Status(Status),
    Help,
    Quit,
}

/// Share settings the shell applies to every share.
#[derive(Debug, Clone)]
pub struct ShareOptions {
    pub title: String,
    pub width: u32,
}

/// The event loop's state and collaborators.
pub struct Shell<S, R, T> {
    session: Session,
    source: S,
    renderer: R,
    target: T,
    share: ShareOptions,
    events: Sender<Event>,
    next_request: u64,
    pending: Option<u64>,
}

impl<S, R, T> Shell<S, R, T>
where
    S: ImageSource,
    R: FilterRenderer,
    T: ShareTarget,
{
    /// `events` is the sender half of the channel the loop reads; source
    /// results are posted there.
    pub fn new(
        source: S,
        renderer: R,
        target: T,
        share: ShareOptions,
        events: Sender<Event>,
    ) -> Self {
        Self {
            session: Session::new(),
            source,
            renderer,
            target,
            share,
            events,
            next_request: 0,
            pending: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handle events until a `Quit` command. Each report is passed to
    /// `on_report` as soon as it is produced.
    ///
    /// The shell keeps a sender of its own for source results, so the
    /// channel never disconnects while the shell is alive: input that ends
    /// must be followed by `Quit`.
    pub fn run(&mut self, events: &Receiver<Event>, mut on_report: impl FnMut(&Report)) {
        for event in events.iter() {
            let report = self.handle(event);
            on_report(&report);
            if report == Report::Quit {
                break;
            }
        }
    }

    /// Handle one event.
    pub fn handle(&mut self, event: Event) -> Report {
        match event {
            Event::Command(command) => self.handle_command(command),
            Event::SourceResolved { request, result } => {
                if self.pending != Some(request) {
                    debug!(request, "discarding stale source result");
                    return Report::Discarded;
                }
                self.pending = None;
                match self.session.source_resolved(result) {
                    Ok(()) => {
                        let (width, height) = self
                            .session
                            .source()
                            .map(|s| (s.width(), s.height()))
                            .unwrap_or_default();
                        Report::PhotoReady { width, height }
                    }
                    Err(e) => Report::SourceFailed(e.to_string()),
                }
            }
        }
    }

    fn handle_command(&mut self, command: Command) -> Report {
        match command {
            Command::Camera => {
                if !self.session.request_camera(self.source.is_camera_available()) {
                    return Report::CameraUnavailable;
                }
                let pending = self.source.capture_from_camera();
                self.track(pending);
                Report::CaptureStarted
            }
            Command::Library(path) => {
                let pending = self.source.pick_from_library(&path);
                self.track(pending);
                Report::PickStarted(path)
            }
            Command::Effect => match self.session.apply_effect(&self.renderer) {
                EffectOutcome::Applied(filter) => Report::Applied {
                    filter,
                    next: self.session.cursor(),
                },
                EffectOutcome::NoSource => Report::NoPhoto,
                EffectOutcome::Failed(e) => Report::EffectFailed(e.to_string()),
            },
            Command::Share => {
                let item = self.session.share_item(&self.share.title, self.share.width);
                self.share_item(item)
            }
            Command::ShareOriginal => {
                let item = self
                    .session
                    .share_source_item(&self.share.title, self.share.width);
                self.share_item(item)
            }
            Command::Close => {
                self.session.close();
                self.pending = None;
                Report::Closed
            }
            Command::Status => Report::Status(self.status()),
            Command::Help => Report::Help,
            Command::Quit => Report::Quit,
        }
    }

    fn share_item(&self, item: Result<Option<ShareItem>, BackendError>) -> Report {
        match item {
            Ok(Some(item)) => match self.target.share(&item) {
                Ok(path) => Report::Shared(path),
                Err(e) => Report::ShareFailed(e.to_string()),
            },
            Ok(None) => Report::NothingToShare,
            Err(e) => {
                warn!(error = %e, "photo cannot be prepared for sharing");
                Report::ShareFailed(e.to_string())
            }
        }
    }

    /// Remember `pending` as the one outstanding request and forward its
    /// result into the event channel.
    fn track(&mut self, pending: PendingImage) {
        let request = self.next_request;
        self.next_request += 1;
        self.pending = Some(request);
        let events = self.events.clone();
        pending.on_resolve(move |result| {
            // Loop already exited; nobody is left to care.
            let _ = events.send(Event::SourceResolved { request, result });
        });
    }

    fn status(&self) -> Status {
        Status {
            dialog_visible: self.session.capture_dialog_visible(),
            photo: self.session.source().map(|s| (s.width(), s.height())),
            cursor: self.session.cursor(),
            rendered_with: self.session.rendered().map(|r| r.filter()),
            waiting: self.pending.is_some(),
        }
    }
}
