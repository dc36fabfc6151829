//! Image transforms behind the crop service.
//!
//! Provides decoding, counter-clockwise rotation with canvas expansion,
//! Lanczos3 zoom, padded cropping, and PNG/JPEG re-encoding, plus the fixed
//! pipeline that chains them.

pub mod codec;
pub mod crop;
pub mod error;
pub mod limits;
pub mod pipeline;
pub mod resize;
pub mod rotate;

// Re-exports for convenience
pub use codec::{EncodedImage, OutputFormat, decode, encode};
pub use crop::{CropBox, crop};
pub use error::ProcessError;
pub use limits::max_alloc_bytes;
pub use pipeline::{CropParams, process, transform};
pub use resize::zoom;
pub use rotate::rotate_expand;
