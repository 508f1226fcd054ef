//! # snapfx
//!
//! Take or import a photo, cycle through a fixed set of photo effects, and
//! share the result.
//!
//! # Architecture
//!
//! Three pieces, leaves first:
//!
//! ```text
//! ImageSource ──▶ Session ──▶ apply_next_filter ──▶ FilterRenderer
//!  (camera,        (shell      (catalog + cursor)     (pixel work)
//!   library)        state)
//!                    │
//!                    └──▶ ShareTarget
//! ```
//!
//! - A source resolves, asynchronously, to a photo or to nothing.
//! - The session stores the photo and, on every "effect" press, renders the
//!   catalog entry under the cursor from the *original* photo, then moves the
//!   cursor on (wrapping after the last entry).
//! - Sharing hands a resized copy of the displayed photo to a share target.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | The nine filter identifiers and the cyclic cursor |
//! | [`pipeline`] | Stateless "apply the filter under the cursor" step |
//! | [`imaging`] | Bitmaps, the pure-Rust renderer, resize and encode |
//! | [`source`] | Camera and library providers with single-shot results |
//! | [`session`] | Edit-session state and its transitions |
//! | [`shell`] | Single-threaded event loop driving a session |
//! | [`share`] | Share targets (directory writer with JSON sidecar) |
//! | [`config`] | `config.toml` loading, validation, and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Cycling Instead of Picking
//!
//! There is one repeatable "effect" action and no filter picker. Repeated
//! presses reach every filter, in catalog order. The cursor lives in the
//! session, not in the pipeline, so the pipeline is a plain function.
//!
//! ## No Chaining
//!
//! Each effect starts from the untouched photo. Pressing "effect" twice shows
//! the second filter, not the second filter applied on top of the first.
//!
//! ## Sources Never Block the Session
//!
//! Camera capture and library import report back through a one-shot channel.
//! The shell forwards that result into its own event queue, so every state
//! change happens on one thread in the order events arrived.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, effects, resizing, and encoding use the `image` crate and plain
//! Rust. No system imaging libraries are required.

pub mod catalog;
pub mod config;
pub mod imaging;
pub mod output;
pub mod pipeline;
pub mod session;
pub mod share;
pub mod shell;
pub mod source;

#[cfg(test)]
pub(crate) mod test_helpers;
