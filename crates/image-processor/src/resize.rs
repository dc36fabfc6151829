//! Uniform zoom using Lanczos3 filtering.

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

use crate::error::ProcessError;
use crate::limits::check_output_size;

/// Target dimensions for scaling `width x height` by `zoom`.
///
/// Each side is rounded to the nearest pixel. Returns `None` when the factor
/// is not a positive finite number or a side would collapse to zero.
pub fn zoomed_dimensions(width: u32, height: u32, zoom: f64) -> Option<(u32, u32)> {
    if !zoom.is_finite() || zoom <= 0.0 {
        return None;
    }
    let new_w = (f64::from(width) * zoom).round();
    let new_h = (f64::from(height) * zoom).round();
    if new_w < 1.0 || new_h < 1.0 || new_w > f64::from(u32::MAX) || new_h > f64::from(u32::MAX) {
        return None;
    }
    Some((new_w as u32, new_h as u32))
}

/// Scale the whole image by `zoom` in both directions.
///
/// Returns the image unchanged when `zoom` is exactly 1.0.
pub fn zoom(img: &DynamicImage, zoom: f64) -> Result<DynamicImage, ProcessError> {
    let (orig_w, orig_h) = (img.width(), img.height());

    if zoom == 1.0 {
        debug!("Zoom factor is 1.0, skipping resize");
        return Ok(img.clone());
    }

    let (new_w, new_h) =
        zoomed_dimensions(orig_w, orig_h, zoom).ok_or(ProcessError::InvalidZoom(zoom))?;
    check_output_size(u64::from(new_w), u64::from(new_h), img.color())?;

    debug!(orig_w, orig_h, new_w, new_h, zoom, "Zooming image");

    Ok(img.resize_exact(new_w, new_h, FilterType::Lanczos3))
}
