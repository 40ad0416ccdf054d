//! Codec boundary: bytes in, [`RasterImage`](pixel_art::RasterImage) out, and back.
//!
//! Decoding accepts anything the `image` crate can sniff from content.
//! Encoding picks the container from the output file extension.

mod decode;
mod encode;

pub use decode::{decode, image_info, DecodedImage, ImageInfo};
pub use encode::{encode, EncodeOptions, OutputFormat, DEFAULT_JPEG_QUALITY};
