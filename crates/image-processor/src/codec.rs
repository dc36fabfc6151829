//! Decoding uploaded bytes and encoding results back to PNG or JPEG.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::error::ProcessError;

/// JPEG quality used for re-encoding.
pub const JPEG_QUALITY: u8 = 75;

/// Output encoding, chosen from the uploaded filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// PNG when the filename ends in `.png` (any case), JPEG otherwise.
    ///
    /// Only the name is consulted, never the decoded pixel data, so a
    /// transparent PNG uploaded under another extension comes back as JPEG.
    pub fn from_filename(filename: &str) -> Self {
        if filename.to_lowercase().ends_with(".png") {
            Self::Png
        } else {
            Self::Jpeg
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
        }
    }
}

/// Encoded output bytes together with the format they were written in.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
}

impl EncodedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Decode raw upload bytes, sniffing the container format from the content.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ProcessError> {
    let img = image::load_from_memory(bytes).map_err(ProcessError::Decode)?;
    debug!(w = img.width(), h = img.height(), color = ?img.color(), "Decoded image");
    Ok(img)
}

/// Encode an image in the requested format.
pub fn encode(img: &DynamicImage, format: OutputFormat) -> Result<EncodedImage, ProcessError> {
    let mut bytes = Vec::new();
    let result = match format {
        OutputFormat::Png => {
            png_compatible(img).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        }
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = img.to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode_image(&rgb)
        }
    };
    result.map_err(|source| ProcessError::Encode {
        format: format.name(),
        source,
    })?;

    debug!(len = bytes.len(), format = format.name(), "Encoded image");
    Ok(EncodedImage { bytes, format })
}

/// The PNG encoder only takes 8/16-bit integer samples.
fn png_compatible(img: &DynamicImage) -> std::borrow::Cow<'_, DynamicImage> {
    match img {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            std::borrow::Cow::Owned(DynamicImage::ImageRgba8(img.to_rgba8()))
        }
        _ => std::borrow::Cow::Borrowed(img),
    }
}
