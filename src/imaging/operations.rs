//! High-level image operations.
//!
//! These functions combine calculations with backend execution.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::calculate_width_dimensions;
use super::params::{Quality, ResizeParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Plan a width-only resize without executing it.
pub fn plan_resize(
    source: &Path,
    output: &Path,
    original: Dimensions,
    target_width: u32,
    quality: Quality,
) -> ResizeParams {
    let (width, height) =
        calculate_width_dimensions((original.width, original.height), target_width);
    ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        quality,
    }
}

/// Write a copy of `source` scaled to `target_width` at `output`.
///
/// Height follows the source aspect ratio. Returns the dimensions written.
pub fn materialize(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    target_width: u32,
    quality: Quality,
) -> Result<Dimensions> {
    let original = backend.identify(source)?;
    let params = plan_resize(source, output, original, target_width, quality);
    backend.resize(&params)?;
    Ok(Dimensions {
        width: params.width,
        height: params.height,
    })
}
