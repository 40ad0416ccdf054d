//! Raster containers.
//!
//! [`RasterImage`] is the interleaved 8-bit image handed to and returned from
//! the pipeline. [`ChannelPlane`] is the derived single-purpose buffer the
//! stages pass between each other: either the RGB samples or the alpha
//! samples of an image, never both. Every stage produces a new plane; none
//! mutates its input.

mod alloc;
mod error;
mod image;
mod plane;

pub use alloc::AllocError;
pub(crate) use alloc::try_alloc;
pub use error::ImageError;
pub use image::{ChannelLayout, RasterImage};
pub use plane::{ChannelPlane, PlaneKind};
