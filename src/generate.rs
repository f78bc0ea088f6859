//! The build pipeline.
//!
//! A single linear pass from content directory to finished site:
//!
//! ```text
//! 1. Reset    output/ is deleted (if present) and recreated empty
//! 2. Load     meta.json + item directories → SiteRecord   (fatal on bad root)
//! 3. Index    index template → output/index.html          (failure recorded)
//! 4. Items    for each item, in load order:
//!               create output/<name>/, img/, img/thumbs/
//!               item template → output/<name>/index.html   (failure recorded)
//!               every image → img/<file> + img/thumbs/<file>
//! ```
//!
//! ## Output Structure
//!
//! ```text
//! html/
//! ├── index.html
//! └── cat/
//!     ├── index.html
//!     └── img/
//!         ├── a.jpg          # full width
//!         ├── b.png
//!         └── thumbs/
//!             ├── a.jpg      # thumbnail width
//!             └── b.png
//! ```
//!
//! ## Failure Model
//!
//! - An output directory that holds the content or templates is refused
//!   before anything is deleted.
//! - Root metadata errors abort before anything is rendered.
//! - Skipped items and failed pages are collected in the [`BuildReport`].
//! - An image that cannot be materialized aborts the run. Whatever was
//!   already written stays on disk; the next build starts from a clean tree.
//!
//! ## Parallel Processing
//!
//! The images of an item are materialized in parallel using
//! [rayon](https://docs.rs/rayon). Output files do not depend on worker
//! order; only the order of progress events does.

use crate::config::{BuildConfig, ConfigError};
use crate::imaging::{
    BackendError, Dimensions, ImageBackend, Quality, RustBackend, materialize,
};
use crate::metadata::{self, LoadOutcome, MetadataError, SkippedItem};
use crate::render::{INDEX_TEMPLATE, ITEM_TEMPLATE, RenderError, Renderer};
use crate::types::ItemRecord;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

/// File name of every rendered page.
pub const PAGE_FILE: &str = "index.html";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Cannot reset output directory {path}: {source}")]
    Reset {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error("Cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to process image {image}: {source}")]
    Imaging {
        image: PathBuf,
        #[source]
        source: BackendError,
    },
}

/// Progress events emitted while the pipeline runs.
#[derive(Debug, Clone)]
pub enum BuildEvent {
    OutputReset {
        path: PathBuf,
    },
    ItemSkipped {
        name: String,
        reason: String,
    },
    PageRendered {
        page: PathBuf,
    },
    PageFailed {
        page: PathBuf,
        reason: String,
    },
    ItemStarted {
        title: String,
    },
    ImageMaterialized {
        filename: String,
        full: Dimensions,
        thumbnail: Dimensions,
    },
}

/// A page that could not be rendered. The rest of the site is unaffected.
#[derive(Debug)]
pub struct PageFailure {
    /// Page path relative to the output root.
    pub page: PathBuf,
    pub error: RenderError,
}

/// What a completed build produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Site title from the root metadata, if any.
    pub site_title: Option<String>,
    pub items_built: usize,
    pub images_written: usize,
    pub skipped: Vec<SkippedItem>,
    pub page_failures: Vec<PageFailure>,
}

/// Run the full pipeline with the pure Rust imaging backend.
pub fn build(
    config: &BuildConfig,
    events: Option<Sender<BuildEvent>>,
) -> Result<BuildReport, BuildError> {
    build_with_backend(&RustBackend::new(), config, events)
}

/// Run the full pipeline using a specific backend (allows testing with mock).
pub fn build_with_backend(
    backend: &impl ImageBackend,
    config: &BuildConfig,
    events: Option<Sender<BuildEvent>>,
) -> Result<BuildReport, BuildError> {
    let emit = |event: BuildEvent| {
        if let Some(tx) = &events {
            tx.send(event).ok();
        }
    };

    config.check_output_dir()?;
    reset_output_dir(&config.output_dir)?;
    emit(BuildEvent::OutputReset {
        path: config.output_dir.clone(),
    });

    let LoadOutcome { site, skipped } = metadata::load_site(config)?;
    for item in &skipped {
        emit(BuildEvent::ItemSkipped {
            name: item.name.clone(),
            reason: item.error.to_string(),
        });
    }

    let mut report = BuildReport {
        site_title: site.title().map(str::to_string),
        skipped,
        ..BuildReport::default()
    };

    let renderer = Renderer::new(&config.template_dir);
    let quality = Quality::new(config.images.quality);

    let page = PathBuf::from(PAGE_FILE);
    render_page(&renderer, INDEX_TEMPLATE, &site, page, config, &mut report, &emit);

    for item in &site.items {
        emit(BuildEvent::ItemStarted {
            title: item.title.clone(),
        });

        let dirs = ItemDirs::create(config, item)?;
        let page = Path::new(&item.name).join(PAGE_FILE);
        render_page(&renderer, ITEM_TEMPLATE, item, page, config, &mut report, &emit);

        item.images.par_iter().try_for_each(|filename| {
            let source = config.content_dir.join(&item.name).join(filename);
            let variant = |dir: &Path, width: u32| {
                materialize(backend, &source, &dir.join(filename), width, quality).map_err(
                    |source_err| BuildError::Imaging {
                        image: source.clone(),
                        source: source_err,
                    },
                )
            };
            let full = variant(&dirs.images, config.images.full_width)?;
            let thumbnail = variant(&dirs.thumbs, config.images.thumbnail_width)?;
            emit(BuildEvent::ImageMaterialized {
                filename: filename.clone(),
                full,
                thumbnail,
            });
            Ok::<(), BuildError>(())
        })?;
    }

    report.items_built = site.items.len();
    report.images_written = site.items.iter().map(|i| i.images.len()).sum();
    Ok(report)
}

/// Delete `path` recursively if it exists, then recreate it empty.
pub fn reset_output_dir(path: &Path) -> Result<(), BuildError> {
    let wrap = |source| BuildError::Reset {
        path: path.to_path_buf(),
        source,
    };
    if path.exists() {
        fs::remove_dir_all(path).map_err(wrap)?;
    }
    fs::create_dir_all(path).map_err(wrap)
}

/// Output directories of one item.
struct ItemDirs {
    images: PathBuf,
    thumbs: PathBuf,
}

impl ItemDirs {
    /// Create the item, image, and thumbnail directories. Each must not exist
    /// yet; the reset step guarantees that on a normal run.
    fn create(config: &BuildConfig, item: &ItemRecord) -> Result<Self, BuildError> {
        let root = config.output_dir.join(&item.name);
        let images = root.join(&config.layout.images_dir);
        let thumbs = images.join(&config.layout.thumbs_dir);
        for dir in [&root, &images, &thumbs] {
            fs::create_dir(dir).map_err(|source| BuildError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(Self { images, thumbs })
    }
}

/// Render one page. A failure is reported and recorded, never propagated.
fn render_page<S: Serialize>(
    renderer: &Renderer,
    template: &str,
    context: &S,
    page: PathBuf,
    config: &BuildConfig,
    report: &mut BuildReport,
    emit: &impl Fn(BuildEvent),
) {
    match renderer.render_page(template, context, &config.output_dir.join(&page)) {
        Ok(()) => emit(BuildEvent::PageRendered { page }),
        Err(error) => {
            emit(BuildEvent::PageFailed {
                page: page.clone(),
                reason: error.to_string(),
            });
            report.page_failures.push(PageFailure { page, error });
        }
    }
}
