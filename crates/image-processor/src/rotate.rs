//! Rotation with canvas expansion.
//!
//! Angles are in degrees, counter-clockwise. The output canvas always grows
//! to hold every corner of the rotated source, so nothing is clipped.

use image::{ColorType, DynamicImage, ImageBuffer, Rgba};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use tracing::debug;

/// Compute the canvas size needed to hold a `width x height` image rotated
/// by `degrees`.
///
/// For non-quarter turns the corners are rotated about the centre and each
/// axis spans `ceil(max) - floor(min)`, so the canvas can be a pixel larger
/// than the tight bounding box (a 10x10 square at 45 degrees gets 16x16).
pub fn rotated_bounds(width: u32, height: u32, degrees: i64) -> (u32, u32) {
    match degrees.rem_euclid(360) {
        0 | 180 => (width, height),
        90 | 270 => (height, width),
        normalized => {
            let rad = (normalized as f64).to_radians();
            // Round away trig noise so exact values stay exact
            let cos = round15(rad.cos());
            let sin = round15(rad.sin());
            let (hw, hh) = (f64::from(width) / 2.0, f64::from(height) / 2.0);

            let corners = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)];
            let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
            let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
            for (x, y) in corners {
                let rx = x * cos + y * sin;
                let ry = -x * sin + y * cos;
                min_x = min_x.min(rx);
                max_x = max_x.max(rx);
                min_y = min_y.min(ry);
                max_y = max_y.max(ry);
            }

            let new_w = (max_x.ceil() - min_x.floor()) as u32;
            let new_h = (max_y.ceil() - min_y.floor()) as u32;
            (new_w.max(1), new_h.max(1))
        }
    }
}

fn round15(v: f64) -> f64 {
    (v * 1e15).round() / 1e15
}

/// Rotate `img` counter-clockwise by `degrees`, expanding the canvas.
///
/// Quarter turns are exact pixel permutations. Any other angle is resampled
/// with nearest-neighbour inverse mapping; canvas area not covered by the
/// source is left as zero pixels (transparent if the image carries alpha).
/// The result keeps the source colour type.
pub fn rotate_expand(img: &DynamicImage, degrees: i64) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    let normalized = degrees.rem_euclid(360);
    debug!(w, h, angle = degrees, normalized, "Rotating image");

    // image's rotateN helpers turn clockwise
    match normalized {
        0 => img.clone(),
        90 => img.rotate270(),
        180 => img.rotate180(),
        270 => img.rotate90(),
        _ => rotate_arbitrary(img, normalized),
    }
}

fn rotate_arbitrary(img: &DynamicImage, degrees: i64) -> DynamicImage {
    let color = img.color();
    let (src_w, src_h) = (img.width(), img.height());
    let (dst_w, dst_h) = rotated_bounds(src_w, src_h, degrees);

    // Projection::rotate is clockwise in image space, so negate
    let theta = -(degrees as f32).to_radians();
    let projection = Projection::translate(dst_w as f32 / 2.0, dst_h as f32 / 2.0)
        * Projection::rotate(theta)
        * Projection::translate(-(src_w as f32) / 2.0, -(src_h as f32) / 2.0);

    let bits_per_channel = color.bits_per_pixel() / u16::from(color.channel_count());
    let rotated = if bits_per_channel > 8 {
        let src = img.to_rgba16();
        let mut out: ImageBuffer<Rgba<u16>, Vec<u16>> = ImageBuffer::new(dst_w, dst_h);
        warp_into(
            &src,
            &projection,
            Interpolation::Nearest,
            Rgba([0, 0, 0, 0]),
            &mut out,
        );
        DynamicImage::ImageRgba16(out)
    } else {
        let src = img.to_rgba8();
        let mut out = image::RgbaImage::new(dst_w, dst_h);
        warp_into(
            &src,
            &projection,
            Interpolation::Nearest,
            Rgba([0, 0, 0, 0]),
            &mut out,
        );
        DynamicImage::ImageRgba8(out)
    };
    debug!(dst_w, dst_h, ?color, "Rotated onto expanded canvas");

    convert_to(rotated, color)
}

/// Convert `img` into the given colour type.
fn convert_to(img: DynamicImage, color: ColorType) -> DynamicImage {
    match color {
        ColorType::L8 => DynamicImage::ImageLuma8(img.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(img.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(img.to_rgb8()),
        ColorType::Rgba8 => DynamicImage::ImageRgba8(img.to_rgba8()),
        ColorType::L16 => DynamicImage::ImageLuma16(img.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(img.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(img.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(img.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(img.to_rgb32f()),
        ColorType::Rgba32F => DynamicImage::ImageRgba32F(img.to_rgba32f()),
        _ => img,
    }
}
