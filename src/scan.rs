//! Image discovery inside an item directory.
//!
//! Only files directly inside the directory count; the extension check is
//! case-insensitive against a fixed allow-list.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "gif", "png"];

/// Whether a file name carries one of the [`IMAGE_EXTENSIONS`].
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// List image file names in `dir`, sorted by name.
///
/// Names are returned as found on disk; they need not be valid UTF-8.
/// Subdirectories are ignored even if their name looks like an image. A
/// listing failure propagates; the caller decides whether it is fatal.
pub fn discover_images(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if is_image(&path) {
            images.push(entry.file_name());
        }
    }
    images.sort();
    Ok(images)
}
