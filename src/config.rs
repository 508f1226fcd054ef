//! Application configuration.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a user file overrides only the keys it names.
//!
//! ## Config File Location
//!
//! `snapfx --config <path>` loads that file. Without the flag, `config.toml`
//! in the current directory is used if present, otherwise stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [share]
//! width = 1024              # Shared photos are scaled to exactly this width
//! title = "Photo"           # Display title attached to shared photos
//! format = "jpeg"           # "jpeg" or "png"
//! quality = 90              # JPEG quality (1-100)
//! open = false              # Open each shared photo with the default app
//!
//! [camera]
//! command = ["libcamera-still", "-n", "-o", "-"]
//!
//! [processing]
//! max_threads = 4           # Cap for filter rendering threads (omit for auto)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::ShareFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// How shared photos are sized and encoded.
    pub share: ShareConfig,
    /// Camera capture command.
    pub camera: CameraConfig,
    /// Filter rendering thread pool.
    pub processing: ProcessingConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.share.width == 0 {
            return Err(ConfigError::Validation("share.width must be non-zero".into()));
        }
        if !(1..=100).contains(&self.share.quality) {
            return Err(ConfigError::Validation("share.quality must be 1-100".into()));
        }
        if self.processing.max_threads == Some(0) {
            return Err(ConfigError::Validation("processing.max_threads must be at least 1".into()));
        }
        Ok(())
    }
}

/// Share settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShareConfig {
    /// Exact width of shared photos; height keeps the aspect ratio.
    pub width: u32,
    /// Display title attached to every shared photo.
    pub title: String,
    pub format: ShareFormat,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Open each shared photo with the desktop's default handler.
    pub open: bool,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            title: "Photo".to_string(),
            format: ShareFormat::Jpeg,
            quality: 90,
            open: false,
        }
    }
}

/// Camera settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Command that captures one still and writes it, encoded, to stdout.
    /// An empty list disables the camera.
    pub command: Vec<String>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            command: ["libcamera-still", "-n", "-o", "-"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of threads used to render a filter.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_threads.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(AppConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `path` merged over stock defaults, then validate.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    let config: AppConfig = merge_toml(stock_defaults_value()?, overlay).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `explicit` if given, else `./config.toml` if it exists, else defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let local = Path::new("config.toml");
            if local.exists() {
                load_config(local)
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# snapfx Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Sharing
# ---------------------------------------------------------------------------
[share]
# Shared photos are scaled so their width is exactly this many pixels.
# Height follows the photo's aspect ratio. Smaller photos are scaled up.
width = 1024

# Display title attached to each shared photo.
title = "Photo"

# Encoding for shared photos: "jpeg" or "png".
format = "jpeg"

# JPEG quality (1 = worst, 100 = best). Ignored for PNG.
quality = 90

# Open each shared photo with the desktop's default application.
open = false

# ---------------------------------------------------------------------------
# Camera
# ---------------------------------------------------------------------------
[camera]
# Command that captures one still photo and writes it to stdout.
# Set to [] to disable the camera.
command = ["libcamera-still", "-n", "-o", "-"]

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum threads used to render a filter.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_threads = 4
"##
}
