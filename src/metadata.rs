//! Metadata loading: root `meta.json` plus one `meta.json` per item directory.
//!
//! Failure handling is split by granularity:
//!
//! - The root metadata file is mandatory. Missing or malformed, it aborts the
//!   whole run with a [`MetadataError`].
//! - Each item is independent. A missing or malformed item file, a missing
//!   required field, an unreadable directory, or a thumbnail that is not among
//!   the discovered images turns into a [`SkippedItem`] and the load moves on.
//!
//! Item directories are visited in file-name order so that the index listing
//! and the generated tree are the same on every platform.

use crate::config::BuildConfig;
use crate::scan;
use crate::types::{ITEM_RESERVED_KEYS, ItemRecord, SiteRecord};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Fatal errors: the run cannot continue without root metadata.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Cannot read root metadata {path}: {source}")]
    RootRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed root metadata {path}: {source}")]
    RootParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Root metadata {0} must be a JSON object")]
    RootNotObject(PathBuf),
    #[error("Cannot list content directory: {0}")]
    ContentList(#[from] walkdir::Error),
}

/// Per-item errors. These never abort a run.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0} must be a JSON object")]
    NotObject(PathBuf),
    #[error("Missing or non-string field '{field}' in {path}")]
    MissingField { path: PathBuf, field: &'static str },
    #[error("Cannot list images in {path}: {source}")]
    ListImages {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not valid UTF-8", .0.display())]
    NonUtf8Name(PathBuf),
    #[error("Thumbnail image '{0}' does not exist. Check metadata.")]
    ThumbnailNotFound(String),
}

/// An item directory that was left out of the site, and why.
#[derive(Debug)]
pub struct SkippedItem {
    pub name: String,
    pub error: ItemError,
}

/// Everything the load phase produced.
#[derive(Debug)]
pub struct LoadOutcome {
    pub site: SiteRecord,
    pub skipped: Vec<SkippedItem>,
}

/// Load the site record from `config.content_dir`.
pub fn load_site(config: &BuildConfig) -> Result<LoadOutcome, MetadataError> {
    let root = &config.content_dir;
    let mut fields = load_root_fields(&root.join(&config.meta_file))?;
    // `items` is always the loader's list, never a root key.
    fields.remove("items");

    let mut items = Vec::new();
    let mut skipped = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            skipped.push(SkippedItem {
                name: entry.file_name().to_string_lossy().into_owned(),
                error: ItemError::NonUtf8Name(entry.path().to_path_buf()),
            });
            continue;
        };
        match load_item(entry.path(), &name, config) {
            Ok(item) => items.push(item),
            Err(error) => skipped.push(SkippedItem { name, error }),
        }
    }

    Ok(LoadOutcome {
        site: SiteRecord { fields, items },
        skipped,
    })
}

fn load_root_fields(path: &Path) -> Result<Map<String, Value>, MetadataError> {
    let content = fs::read_to_string(path).map_err(|source| MetadataError::RootRead {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value =
        serde_json::from_str(&content).map_err(|source| MetadataError::RootParse {
            path: path.to_path_buf(),
            source,
        })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(MetadataError::RootNotObject(path.to_path_buf())),
    }
}

/// Build one item record from its directory.
pub fn load_item(dir: &Path, name: &str, config: &BuildConfig) -> Result<ItemRecord, ItemError> {
    let meta_path = dir.join(&config.meta_file);
    let content = fs::read_to_string(&meta_path).map_err(|source| ItemError::Read {
        path: meta_path.clone(),
        source,
    })?;
    let mut extra = match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return Err(ItemError::NotObject(meta_path)),
        Err(source) => {
            return Err(ItemError::Parse {
                path: meta_path,
                source,
            });
        }
    };

    let title = required_string(&extra, "title", &meta_path)?;
    let thumb = required_string(&extra, "thumb", &meta_path)?;

    let images = scan::discover_images(dir)
        .map_err(|source| ItemError::ListImages {
            path: dir.to_path_buf(),
            source,
        })?
        .into_iter()
        .map(|file| {
            file.into_string()
                .map_err(|file| ItemError::NonUtf8Name(dir.join(file)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if !images.iter().any(|img| *img == thumb) {
        return Err(ItemError::ThumbnailNotFound(thumb));
    }

    for key in ITEM_RESERVED_KEYS {
        extra.remove(*key);
    }

    let fullimage_path = format!("{}/{}", name, config.layout.images_dir);
    let thumbnail_path = format!("{}/{}", fullimage_path, config.layout.thumbs_dir);

    Ok(ItemRecord {
        name: name.to_string(),
        title,
        thumb,
        images,
        fullimage_path,
        thumbnail_path,
        extra,
    })
}

fn required_string(
    map: &Map<String, Value>,
    field: &'static str,
    path: &Path,
) -> Result<String, ItemError> {
    map.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ItemError::MissingField {
            path: path.to_path_buf(),
            field,
        })
}
