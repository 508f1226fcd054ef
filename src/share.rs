//! Share target: where a finished photo leaves the app.
//!
//! A [`ShareItem`] is one bitmap, already oriented and resized for sharing,
//! plus a display title. [`DirectoryShare`] writes it to an output directory:
//!
//! ```text
//! shared/
//! ├── photo-001.jpg     # the encoded photo
//! ├── photo-001.json    # { "title": "Photo", "filter": "noir", "width": 1024, ... }
//! └── photo-002.jpg
//! ```
//!
//! Numbers continue from whatever is already in the directory, so repeated
//! runs never overwrite earlier shares. With `open` set, the photo is handed
//! to the desktop's default handler afterwards.

use crate::imaging::{BackendError, Quality, ShareFormat, encode};
use image::RgbaImage;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ShareError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Encoding failed: {0}")]
    Encode(#[from] BackendError),
}

/// One photo ready to share.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareItem {
    pub title: String,
    pub pixels: RgbaImage,
    /// Catalog filter the photo was rendered with, `None` for the original.
    pub filter: Option<&'static str>,
}

/// Sharing capability.
pub trait ShareTarget {
    /// Share `item`, returning where it went.
    fn share(&self, item: &ShareItem) -> Result<PathBuf, ShareError>;
}

/// Sidecar written next to each shared photo.
#[derive(Debug, Serialize)]
struct ShareRecord<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a str>,
    width: u32,
    height: u32,
    file: String,
}

/// Writes shared photos into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryShare {
    dir: PathBuf,
    format: ShareFormat,
    quality: Quality,
    open: bool,
}

impl DirectoryShare {
    pub fn new(dir: impl Into<PathBuf>, format: ShareFormat, quality: Quality) -> Self {
        Self {
            dir: dir.into(),
            format,
            quality,
            open: false,
        }
    }

    /// Open each shared photo with the desktop's default handler.
    pub fn open_after_share(mut self, open: bool) -> Self {
        self.open = open;
        self
    }
}

impl ShareTarget for DirectoryShare {
    fn share(&self, item: &ShareItem) -> Result<PathBuf, ShareError> {
        std::fs::create_dir_all(&self.dir)?;
        let number = next_share_number(&self.dir)?;
        let stem = format!("photo-{number:0>3}");
        let photo_path = self.dir.join(format!("{stem}.{}", self.format.extension()));

        // Encode under a hidden name so a failed share leaves no partial photo.
        let partial_path = self.dir.join(format!(".{stem}.partial"));
        if let Err(e) = write_encoded(&partial_path, item, self.format, self.quality) {
            let _ = std::fs::remove_file(&partial_path);
            return Err(e);
        }
        std::fs::rename(&partial_path, &photo_path)?;

        let record = ShareRecord {
            title: &item.title,
            filter: item.filter,
            width: item.pixels.width(),
            height: item.pixels.height(),
            file: photo_path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        std::fs::write(
            self.dir.join(format!("{stem}.json")),
            serde_json::to_string_pretty(&record)?,
        )?;
        info!(path = %photo_path.display(), title = %item.title, "shared photo");

        if self.open {
            if let Err(e) = open::that(&photo_path) {
                warn!(path = %photo_path.display(), error = %e, "could not open shared photo");
            }
        }
        Ok(photo_path)
    }
}

fn write_encoded(
    path: &Path,
    item: &ShareItem,
    format: ShareFormat,
    quality: Quality,
) -> Result<(), ShareError> {
    let mut writer = BufWriter::new(File::create(path)?);
    encode(&item.pixels, format, quality, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// One past the highest `photo-NNN` already in `dir`.
fn next_share_number(dir: &Path) -> std::io::Result<u32> {
    let mut max: u32 = 0;
    for entry in std::fs::read_dir(dir)? {
        let name = entry?.file_name();
        let name = name.to_string_lossy();
        let number = name
            .strip_prefix("photo-")
            .and_then(|rest| rest.split('.').next())
            .and_then(|digits| digits.parse::<u32>().ok());
        if let Some(n) = number {
            max = max.max(n);
        }
    }
    max.checked_add(1).ok_or_else(|| {
        std::io::Error::other(format!("no share numbers left in {}", dir.display()))
    })
}
