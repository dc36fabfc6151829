//! Errors raised by the decode/transform/encode steps.

/// Failure anywhere in the crop pipeline.
///
/// The `Display` text is what ends up in the client-facing error detail,
/// so variants carry the underlying codec message verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("cannot identify image file: {0}")]
    Decode(#[source] image::ImageError),
    #[error("cannot encode image as {format}: {source}")]
    Encode {
        format: &'static str,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid zoom factor {0}: must be a positive number that keeps the image non-empty")]
    InvalidZoom(f64),
    #[error("invalid crop size {width}x{height}: width and height must be positive")]
    InvalidCrop { width: i64, height: i64 },
    #[error("output image {width}x{height} is too large: needs {bytes} bytes, limit is {limit}")]
    TooLarge {
        width: u64,
        height: u64,
        bytes: u64,
        limit: u64,
    },
}
