//! The fixed crop pipeline: decode, rotate, zoom, crop, encode.

use image::DynamicImage;
use tracing::debug;

use crate::codec::{self, EncodedImage, OutputFormat};
use crate::crop::{self, CropBox};
use crate::error::ProcessError;
use crate::{resize, rotate};

/// Parameters for one crop request.
///
/// `x`/`y`/`width`/`height` address the image *after* rotation and zoom have
/// been applied, not the original upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropParams {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    /// Counter-clockwise degrees.
    pub rotate: i64,
    pub zoom: f64,
}

impl CropParams {
    /// Plain crop with no rotation and no zoom.
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotate: 0,
            zoom: 1.0,
        }
    }

    pub fn crop_box(&self) -> CropBox {
        CropBox::from_extent(self.x, self.y, self.width, self.height)
    }
}

/// Apply rotate, zoom and crop, in that order, to an already-decoded image.
pub fn transform(img: DynamicImage, params: &CropParams) -> Result<DynamicImage, ProcessError> {
    let mut img = img;

    if params.rotate != 0 {
        img = rotate::rotate_expand(&img, params.rotate);
    }

    if params.zoom != 1.0 {
        img = resize::zoom(&img, params.zoom)?;
    }

    crop::crop(&img, params.crop_box())
}

/// Run the whole pipeline on uploaded bytes.
///
/// The output format follows `filename` (see [`OutputFormat::from_filename`]).
pub fn process(
    bytes: &[u8],
    filename: &str,
    params: &CropParams,
) -> Result<EncodedImage, ProcessError> {
    let format = OutputFormat::from_filename(filename);
    debug!(filename, ?params, ?format, "Processing crop request");

    let img = codec::decode(bytes)?;
    let cropped = transform(img, params)?;
    codec::encode(&cropped, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 3) as u8, (y * 5) as u8, 77, 255])
        }))
    }

    fn png_bytes(img: &DynamicImage) -> Vec<u8> {
        codec::encode(img, OutputFormat::Png).unwrap().bytes
    }

    #[test]
    fn test_identity_crop_round_trips_png() {
        let img = gradient(30, 20);
        let out = process(&png_bytes(&img), "in.png", &CropParams::new(0, 0, 30, 20)).unwrap();

        assert_eq!(out.format, OutputFormat::Png);
        let decoded = codec::decode(&out.bytes).unwrap();
        assert_eq!(decoded.to_rgba8(), img.to_rgba8());
    }

    #[test]
    fn test_jpeg_output_for_jpg_name() {
        let img = gradient(200, 120);
        let out = process(
            &png_bytes(&img),
            "photo.JPG",
            &CropParams::new(10, 10, 100, 50),
        )
        .unwrap();

        assert_eq!(out.mime_type(), "image/jpeg");
        assert_eq!(codec::decode(&out.bytes).unwrap().dimensions(), (100, 50));
    }

    #[test]
    fn test_rotate_then_zoom_then_crop() {
        let img = gradient(64, 64);
        let params = CropParams {
            rotate: 90,
            zoom: 2.0,
            ..CropParams::new(0, 0, 64, 64)
        };
        let out = process(&png_bytes(&img), "sprite.png", &params).unwrap();

        assert_eq!(out.mime_type(), "image/png");
        assert_eq!(codec::decode(&out.bytes).unwrap().dimensions(), (64, 64));
    }

    #[test]
    fn test_crop_coordinates_refer_to_rotated_image() {
        // 40x10 turned 90 degrees is 10x40; a 10x40 box is only valid afterwards
        let img = gradient(40, 10);
        let params = CropParams {
            rotate: 90,
            ..CropParams::new(0, 0, 10, 40)
        };
        let result = transform(img.clone(), &params).unwrap();

        assert_eq!(result.dimensions(), (10, 40));
        assert_eq!(result.to_rgba8(), img.rotate270().to_rgba8());
    }

    #[test]
    fn test_zoom_applies_before_crop() {
        let img = gradient(10, 10);
        let params = CropParams {
            zoom: 3.0,
            ..CropParams::new(20, 20, 10, 10)
        };
        let result = transform(img, &params).unwrap();

        // box lies in the lower-right third of the 30x30 zoomed image
        assert_eq!(result.dimensions(), (10, 10));
        assert_eq!(result.get_pixel(9, 9).0[3], 255);
    }

    #[test]
    fn test_malformed_bytes_fail_decode() {
        let err = process(b"\x89PNG broken", "x.png", &CropParams::new(0, 0, 1, 1)).unwrap_err();
        assert!(matches!(err, ProcessError::Decode(_)));
    }

    #[test]
    fn test_invalid_zoom_surfaces() {
        let img = gradient(4, 4);
        let params = CropParams {
            zoom: 0.0,
            ..CropParams::new(0, 0, 1, 1)
        };
        assert!(matches!(
            transform(img, &params),
            Err(ProcessError::InvalidZoom(_))
        ));
    }
}
