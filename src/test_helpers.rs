//! Shared test utilities: content-tree builders, synthetic images, and
//! record lookups.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let config = setup_site(tmp.path(), json!({"title": "Gallery"}));
//! add_item(&config, "cat", json!({"title": "Cat", "thumb": "a.jpg"}), &["a.jpg"]);
//!
//! let outcome = load_site(&config).unwrap();
//! assert_eq!(find_item(&outcome.site, "cat").title, "Cat");
//! ```

use std::fs;
use std::path::Path;

use serde_json::Value;
use walkdir::WalkDir;

use crate::config::BuildConfig;
use crate::types::{ItemRecord, SiteRecord};

/// Source image size used by [`add_item`].
pub const DEFAULT_SOURCE_SIZE: (u32, u32) = (64, 48);

// =========================================================================
// Fixture setup
// =========================================================================

/// A config whose content, template, and output roots all live under `root`.
pub fn config_for(root: &Path) -> BuildConfig {
    BuildConfig {
        content_dir: root.join("contents"),
        template_dir: root.join("templates"),
        output_dir: root.join("html"),
        ..BuildConfig::default()
    }
}

/// Create the content root with a root `meta.json`. No templates are written.
pub fn setup_site(root: &Path, meta: Value) -> BuildConfig {
    let config = config_for(root);
    fs::create_dir_all(&config.content_dir).unwrap();
    write_json(&config.content_dir.join(&config.meta_file), &meta);
    config
}

/// Write minimal `index.html` and `item.html` templates.
pub fn write_templates(config: &BuildConfig) {
    fs::create_dir_all(&config.template_dir).unwrap();
    fs::write(
        config.template_dir.join("index.html"),
        "<h1>{{ title }}</h1>\n{% for item in items %}<a href=\"{{ item.name }}/\"><img src=\"{{ item.thumbnail_path }}/{{ item.thumb }}\">{{ item.title }}</a>\n{% endfor %}",
    )
    .unwrap();
    fs::write(
        config.template_dir.join("item.html"),
        "<h1>{{ title }}</h1>\n{% for img in images %}<img src=\"img/{{ img }}\">\n{% endfor %}",
    )
    .unwrap();
}

/// Create an item directory with `meta.json` and real images of
/// [`DEFAULT_SOURCE_SIZE`], encoded according to each file's extension.
pub fn add_item(config: &BuildConfig, name: &str, meta: Value, images: &[&str]) {
    let sized: Vec<(&str, u32, u32)> = images
        .iter()
        .map(|img| (*img, DEFAULT_SOURCE_SIZE.0, DEFAULT_SOURCE_SIZE.1))
        .collect();
    add_item_sized(config, name, meta, &sized);
}

/// Like [`add_item`], with an explicit size per image.
pub fn add_item_sized(config: &BuildConfig, name: &str, meta: Value, images: &[(&str, u32, u32)]) {
    let dir = config.content_dir.join(name);
    fs::create_dir_all(&dir).unwrap();
    write_json(&dir.join(&config.meta_file), &meta);
    for (file, w, h) in images {
        write_image(&dir.join(file), *w, *h);
    }
}

pub fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Write a gradient image; the format follows the extension.
pub fn write_image(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 4 % 256) as u8, (y * 4 % 256) as u8, 128])
    });
    img.save(path).unwrap();
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find an item by directory name. Panics if not found.
pub fn find_item<'a>(site: &'a SiteRecord, name: &str) -> &'a ItemRecord {
    site.items
        .iter()
        .find(|i| i.name == name)
        .unwrap_or_else(|| panic!("item '{name}' not found. Available: {:?}", item_names(site)))
}

/// All item names in load order.
pub fn item_names(site: &SiteRecord) -> Vec<&str> {
    site.items.iter().map(|i| i.name.as_str()).collect()
}

/// Every file under `root`, as sorted `/`-separated relative paths.
pub fn output_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    files.sort();
    files
}
