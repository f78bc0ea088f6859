//! Records built by the metadata loader and consumed by the renderer.
//!
//! Both records serialize flat: the free-form keys from `meta.json` sit next
//! to the derived keys, so templates address `{{ title }}`, `{{ thumb }}`,
//! `{{ name }}` and any custom field the same way.

use serde::Serialize;
use serde_json::{Map, Value};

/// Global site data: every key of the root `meta.json` plus the item list.
#[derive(Debug, Clone, Serialize)]
pub struct SiteRecord {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub items: Vec<ItemRecord>,
}

impl SiteRecord {
    /// Site title if the root metadata declares one.
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }
}

/// One item directory, ready to render.
///
/// Invariant: `thumb` is a member of `images`. The loader refuses to build a
/// record that violates it.
#[derive(Debug, Clone, Serialize)]
pub struct ItemRecord {
    /// Directory name; also the output path segment.
    pub name: String,
    pub title: String,
    /// File name of the image used as the listing thumbnail.
    pub thumb: String,
    /// Discovered image file names, sorted.
    pub images: Vec<String>,
    /// `<name>/<images_dir>`, relative to the site root.
    pub fullimage_path: String,
    /// `<name>/<images_dir>/<thumbs_dir>`, relative to the site root.
    pub thumbnail_path: String,
    /// Remaining keys from the item's `meta.json`, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Keys the loader derives or extracts; stripped from `extra` so the
/// flattened record never carries duplicates.
pub(crate) const ITEM_RESERVED_KEYS: &[&str] = &[
    "name",
    "title",
    "thumb",
    "images",
    "fullimage_path",
    "thumbnail_path",
];
