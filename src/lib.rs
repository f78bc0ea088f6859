//! # gallerygen
//!
//! A tiny static site generator for item galleries. The content directory is
//! the data source: every subdirectory is an item, described by a
//! `meta.json` and illustrated by the images next to it.
//!
//! # Pipeline
//!
//! ```text
//! contents/meta.json          ─┐
//! contents/<item>/meta.json    ├─ load ─→ SiteRecord ─┬─ render ─→ html/index.html
//! contents/<item>/*.jpg|png…  ─┘                      │            html/<item>/index.html
//!                                                     └─ resize ─→ html/<item>/img/*
//!                                                                  html/<item>/img/thumbs/*
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `gallery.toml` loading: paths, image widths, layout names |
//! | [`types`] | `SiteRecord` and `ItemRecord`, the render contexts |
//! | [`scan`] | Image discovery by extension allow-list |
//! | [`metadata`] | Root and per-item metadata loading with per-item error isolation |
//! | [`render`] | Named runtime templates (MiniJinja) written to disk |
//! | [`imaging`] | Width-based proportional resizing via the `image` crate |
//! | [`generate`] | The build driver tying everything together |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Runtime Templates
//!
//! Pages come from template files in the template directory rather than
//! compiled-in markup, so a gallery can be restyled without rebuilding the
//! tool. Records serialize flat: any key in `meta.json` is available to the
//! template under the same name.
//!
//! ## Errors Stay Local
//!
//! A broken item never takes the site down with it: bad item metadata skips
//! that item, a broken template skips that page. Both are reported. Only a
//! missing root `meta.json` or an image that cannot be processed stops a build.
//!
//! ## Deterministic Output
//!
//! Items and images are processed in file-name order, so two builds of the
//! same content produce byte-identical trees.

pub mod config;
pub mod generate;
pub mod imaging;
pub mod metadata;
pub mod output;
pub mod render;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
