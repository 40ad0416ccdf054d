//! Contrast and saturation enhancement.
//!
//! Enhancement runs first in the pipeline, on the full-resolution image,
//! before pixelation picks block representatives:
//!
//! 1. **Contrast** around a fixed neutral gray of 128, per channel:
//!    `v' = clamp(128 + (v - 128) * c, 0, 255)`
//! 2. **Saturation** around the pixel's luma
//!    `L = 0.299 R + 0.587 G + 0.114 B`:
//!    `v' = clamp(L + (v - L) * s, 0, 255)`
//!
//! Intermediate values stay in `f32`; each sample is rounded once at the
//! end. Alpha samples are copied through untouched.
//!
//! # Example
//!
//! ```
//! use pixel_art::{ChannelLayout, Enhancer, RasterImage};
//!
//! // saturation 0 turns color into gray
//! let image = RasterImage::new(1, 1, ChannelLayout::Rgba, vec![200, 40, 40, 77]).unwrap();
//! let gray = Enhancer::new(1.0, 0.0).enhance(&image).unwrap();
//!
//! let p = gray.pixel(0, 0);
//! assert_eq!(p[0], p[1]);
//! assert_eq!(p[1], p[2]);
//! assert_eq!(p[3], 77);
//! ```

mod enhancer;

pub use enhancer::{Enhancer, NEUTRAL_GRAY};
