//! CLI output formatting.
//!
//! Every function here returns lines instead of printing, so the formatting
//! is testable without capturing stdout. `main` does the printing.
//!
//! # Output Format
//!
//! ## Filters
//!
//! ```text
//! 001 mono
//! 002 chrome
//! ...
//! 009 sepia-tone
//! ```
//!
//! ## Shell
//!
//! ```text
//! > library ~/Pictures/dawn.jpg
//! Importing ~/Pictures/dawn.jpg
//! Photo ready (4032x3024)
//! > effect
//! Applied mono
//!     Next: 1 (chrome)
//! > share
//! Shared → shared/photo-001.jpg
//! ```

use crate::catalog::CATALOG;
use crate::shell::Report;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// The filter catalog in application order.
pub fn format_filters() -> Vec<String> {
    CATALOG
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{} {}", format_index(i + 1), name))
        .collect()
}

pub fn print_filters() {
    for line in format_filters() {
        println!("{}", line);
    }
}

/// Shell command reference.
pub fn format_help() -> Vec<String> {
    [
        "camera             Take a photo with the camera",
        "library <path>     Import a photo from the library",
        "effect             Apply the next filter",
        "share              Share the photo as shown",
        "share original     Share the unfiltered photo",
        "close              Close the editor",
        "status             Show the session state",
        "quit               Leave",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// One report from the shell, as display lines.
pub fn format_report(report: &Report) -> Vec<String> {
    match report {
        Report::CaptureStarted => vec!["Capturing...".into()],
        Report::CameraUnavailable => vec!["No camera available".into()],
        Report::PickStarted(path) => vec![format!("Importing {}", path.display())],
        Report::PhotoReady { width, height } => {
            vec![format!("Photo ready ({}x{})", width, height)]
        }
        Report::SourceFailed(reason) => vec![format!("No photo: {}", reason)],
        // Stale results are only interesting in the log.
        Report::Discarded => Vec::new(),
        Report::Applied { filter, next } => vec![
            format!("Applied {}", filter),
            format!("    Next: {}", next),
        ],
        Report::NoPhoto => vec!["No photo yet".into()],
        Report::EffectFailed(reason) => vec![format!("Effect failed: {}", reason)],
        Report::Shared(path) => vec![format!("Shared → {}", path.display())],
        Report::NothingToShare => vec!["Nothing to share".into()],
        Report::ShareFailed(reason) => vec![format!("Share failed: {}", reason)],
        Report::Closed => vec!["Closed".into()],
        Report::Status(status) => {
            let mut lines = vec![format!(
                "Editor: {}",
                if status.dialog_visible { "open" } else { "closed" }
            )];
            lines.push(match status.photo {
                Some((w, h)) => format!("    Photo: {}x{}", w, h),
                None => "    Photo: none".to_string(),
            });
            if let Some(filter) = status.rendered_with {
                lines.push(format!("    Showing: {}", filter));
            }
            lines.push(format!("    Next: {}", status.cursor));
            if status.waiting {
                lines.push("    Waiting for photo".to_string());
            }
            lines
        }
        Report::Help => format_help(),
        Report::Quit => Vec::new(),
    }
}
