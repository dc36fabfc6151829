//! Rectangular crop in pixel coordinates.
//!
//! The box may extend past the image on any side. Whatever part of the box
//! falls outside the source is filled with zero pixels, so the result is
//! always exactly the requested size.

use image::{DynamicImage, imageops};
use tracing::debug;

use crate::error::ProcessError;
use crate::limits::check_output_size;

/// Crop region as `(left, top, right, bottom)`, right/bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl CropBox {
    /// Build the box from an offset and extent.
    pub fn from_extent(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            left: x,
            top: y,
            right: x.saturating_add(width),
            bottom: y.saturating_add(height),
        }
    }

    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }

    /// Whether the box lies entirely within a `width x height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.left >= 0
            && self.top >= 0
            && self.right <= i64::from(width)
            && self.bottom <= i64::from(height)
    }
}

/// Cut `bx` out of `img`, padding with zero pixels where it overhangs.
pub fn crop(img: &DynamicImage, bx: CropBox) -> Result<DynamicImage, ProcessError> {
    let (w, h) = (bx.width(), bx.height());
    if w <= 0 || h <= 0 || w > i64::from(u32::MAX) || h > i64::from(u32::MAX) {
        return Err(ProcessError::InvalidCrop {
            width: w,
            height: h,
        });
    }
    let (out_w, out_h) = (w as u32, h as u32);
    check_output_size(u64::from(out_w), u64::from(out_h), img.color())?;

    if bx.fits_within(img.width(), img.height()) {
        debug!(?bx, "Cropping inside image bounds");
        return Ok(img.crop_imm(bx.left as u32, bx.top as u32, out_w, out_h));
    }

    debug!(
        ?bx,
        img_w = img.width(),
        img_h = img.height(),
        "Crop box overhangs image, padding"
    );
    let mut canvas = DynamicImage::new(out_w, out_h, img.color());
    imageops::replace(&mut canvas, img, -bx.left, -bx.top);
    Ok(canvas)
}
