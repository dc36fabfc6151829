//! Allocation budget for images produced by the transforms.
//!
//! Decoding is already capped by `image`'s default limits; zoom and padded
//! crop take their output size from the request, so they check it here
//! before allocating.

use image::ColorType;

use crate::error::ProcessError;

/// Fallback when `image` reports no allocation limit.
const FALLBACK_MAX_ALLOC: u64 = 512 * 1024 * 1024;

/// Largest pixel buffer, in bytes, a transform may allocate.
///
/// Matches the decoder's default `max_alloc` so an output can never be
/// bigger than an image the service would accept as input.
pub fn max_alloc_bytes() -> u64 {
    image::Limits::default()
        .max_alloc
        .unwrap_or(FALLBACK_MAX_ALLOC)
}

/// Check that a `width x height` buffer of `color` fits the budget.
pub fn check_output_size(width: u64, height: u64, color: ColorType) -> Result<(), ProcessError> {
    let limit = max_alloc_bytes();
    let bytes = width
        .checked_mul(height)
        .and_then(|px| px.checked_mul(u64::from(color.bytes_per_pixel())))
        .unwrap_or(u64::MAX);

    if bytes > limit {
        return Err(ProcessError::TooLarge {
            width,
            height,
            bytes,
            limit,
        });
    }
    Ok(())
}
