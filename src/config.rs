//! Build configuration.
//!
//! Every path and constant the pipeline needs lives in [`BuildConfig`], which
//! is passed explicitly into the driver. Values come from stock defaults,
//! optionally overridden by a sparse `gallery.toml` in the working directory,
//! and finally by command-line flags.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_dir = "contents"   # Root of item directories and meta.json
//! template_dir = "templates" # Holds index.html and item.html
//! output_dir = "html"        # Wiped and regenerated on every build
//! meta_file = "meta.json"    # Metadata file name (root and per item)
//!
//! [images]
//! full_width = 800           # Width of the full-size variant
//! thumbnail_width = 280      # Width of the thumbnail variant
//! quality = 90               # JPEG encoding quality (1-100)
//!
//! [layout]
//! images_dir = "img"         # Per-item full-size image directory
//! thumbs_dir = "thumbs"      # Thumbnail directory, nested in images_dir
//!
//! [processing]
//! max_processes = 4          # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config file {0} does not exist")]
    Missing(PathBuf),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Everything the build pipeline needs to know about paths and sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Directory holding the root metadata file and one subdirectory per item.
    pub content_dir: PathBuf,
    /// Directory the template engine loads named templates from.
    pub template_dir: PathBuf,
    /// Generated site root. Deleted and recreated on every build.
    pub output_dir: PathBuf,
    /// Metadata file name, both at the content root and inside each item.
    pub meta_file: String,
    /// Image variant settings.
    pub images: ImagesConfig,
    /// Output directory names.
    pub layout: LayoutConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("contents"),
            template_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("html"),
            meta_file: "meta.json".to_string(),
            images: ImagesConfig::default(),
            layout: LayoutConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl BuildConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.full_width == 0 || self.images.thumbnail_width == 0 {
            return Err(ConfigError::Validation(
                "images.full_width and images.thumbnail_width must be non-zero".into(),
            ));
        }
        if self.images.quality == 0 || self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        for (key, value) in [
            ("meta_file", &self.meta_file),
            ("layout.images_dir", &self.layout.images_dir),
            ("layout.thumbs_dir", &self.layout.thumbs_dir),
        ] {
            if !is_single_segment(value) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a plain file name, got {value:?}"
                )));
            }
        }
        Ok(())
    }

    /// Refuse an output directory that is, or contains, the content or
    /// template directory: the build deletes `output_dir` before reading
    /// anything.
    ///
    /// Paths are compared after resolving symlinks and `..`, so `.` or
    /// `contents/..` are caught too. A directory that does not exist yet
    /// cannot hold any source files and always passes.
    pub fn check_output_dir(&self) -> Result<(), ConfigError> {
        let Ok(output) = fs::canonicalize(&self.output_dir) else {
            return Ok(());
        };
        for (key, dir) in [
            ("content_dir", &self.content_dir),
            ("template_dir", &self.template_dir),
        ] {
            if let Ok(dir) = fs::canonicalize(dir) {
                if dir.starts_with(&output) {
                    return Err(ConfigError::Validation(format!(
                        "output_dir {} would delete {key} {}",
                        self.output_dir.display(),
                        dir.display()
                    )));
                }
            }
        }
        Ok(())
    }
}

fn is_single_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Image variant settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Target width of the full-size variant; height follows the source aspect.
    pub full_width: u32,
    /// Target width of the thumbnail variant; height follows the source aspect.
    pub thumbnail_width: u32,
    /// JPEG encoding quality (1 = worst, 100 = best). Ignored for PNG and GIF.
    pub quality: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            full_width: 800,
            thumbnail_width: 280,
            quality: 90,
        }
    }
}

/// Names of the per-item output directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub images_dir: String,
    pub thumbs_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            images_dir: "img".to_string(),
            thumbs_dir: "thumbs".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, never below 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(BuildConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
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

/// Load a config file as a raw TOML value. `Ok(None)` if the file is absent.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `path`, merged over stock defaults and validated.
///
/// A missing file is not an error: the stock defaults reproduce the fixed
/// `contents/` → `html/` layout. Use [`load_config_file`] for a path the
/// user named explicitly.
pub fn load_config(path: &Path) -> Result<BuildConfig, ConfigError> {
    from_overlay(load_raw_config(path)?)
}

/// Like [`load_config`], but the file must exist.
pub fn load_config_file(path: &Path) -> Result<BuildConfig, ConfigError> {
    match load_raw_config(path)? {
        Some(overlay) => from_overlay(Some(overlay)),
        None => Err(ConfigError::Missing(path.to_path_buf())),
    }
}

fn from_overlay(overlay: Option<toml::Value>) -> Result<BuildConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: BuildConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `gallery.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# gallerygen configuration
# ========================
# All options are optional. Remove anything you don't need to override.

# Directory holding meta.json and one subdirectory per item.
content_dir = "contents"

# Directory containing the index.html and item.html templates.
template_dir = "templates"

# Generated site. WARNING: deleted and recreated on every build.
output_dir = "html"

# Metadata file name at the content root and in every item directory.
meta_file = "meta.json"

# ---------------------------------------------------------------------------
# Image variants
# ---------------------------------------------------------------------------
# Both variants keep the source aspect ratio: only the width is configured.
[images]
full_width = 800
thumbnail_width = 280
# JPEG encoding quality (1-100). PNG and GIF are lossless.
quality = 90

# ---------------------------------------------------------------------------
# Output layout
# ---------------------------------------------------------------------------
# Full-size images go to <item>/<images_dir>/, thumbnails to
# <item>/<images_dir>/<thumbs_dir>/.
[layout]
images_dir = "img"
thumbs_dir = "thumbs"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image workers. Omit to use all CPU cores.
# max_processes = 4
"##
}
