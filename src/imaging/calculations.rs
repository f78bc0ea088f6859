//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Height that keeps the source aspect ratio at `target_width`.
///
/// `round(source_height × target_width / source_width)`, never below 1 so a
/// very wide source still yields a valid image.
///
/// # Examples
/// ```
/// # use gallerygen::imaging::calculate_scaled_height;
/// // 1600x1200 (4:3) at 800 wide → 600 tall
/// assert_eq!(calculate_scaled_height((1600, 1200), 800), 600);
///
/// // 64x48 at 280 wide → upscaled to 210 tall
/// assert_eq!(calculate_scaled_height((64, 48), 280), 210);
/// ```
pub fn calculate_scaled_height(source: (u32, u32), target_width: u32) -> u32 {
    let (src_w, src_h) = source;
    if src_w == 0 {
        return 1;
    }
    let h = (src_h as f64 * target_width as f64 / src_w as f64).round() as u32;
    h.max(1)
}

/// Output `(width, height)` for a width-only resize.
pub fn calculate_width_dimensions(source: (u32, u32), target_width: u32) -> (u32, u32) {
    (target_width, calculate_scaled_height(source, target_width))
}
