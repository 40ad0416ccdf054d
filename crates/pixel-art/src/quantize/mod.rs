//! Palette construction by median-cut clustering.
//!
//! # Algorithm
//!
//! 1. Build a histogram of distinct colors. With an alpha plane, each pixel
//!    contributes a weight proportional to its alpha; fully transparent
//!    pixels contribute nothing and cannot pull the palette toward hidden
//!    colors.
//! 2. Starting from one cluster holding every color, repeatedly take the
//!    cluster with the widest range on any single channel and split it at
//!    the weighted median of that channel, until there are `K` clusters or
//!    no cluster has two distinct colors left.
//! 3. Each cluster's representative is the weighted average of its members.
//! 4. Every pixel, transparent ones included, is assigned the nearest
//!    representative by Euclidean RGB distance.
//!
//! # Tie-breaking
//!
//! - Widest channel ties resolve R, then G, then B.
//! - Clusters with equal widest range resolve to the earliest cluster.
//! - Colors with equal split-channel values are ordered by full color.
//! - Nearest-representative ties resolve to the lowest palette index.
//!
//! These rules make palettes reproducible bit for bit across runs and
//! platforms; all weights and averages use integer arithmetic.
//!
//! # Example
//!
//! ```
//! use pixel_art::{ChannelPlane, MedianCut, PlaneKind, Rgb};
//!
//! let rgb = ChannelPlane::new(4, 1, PlaneKind::Rgb, vec![
//!     0, 0, 0,   10, 10, 10,   240, 240, 240,   250, 250, 250,
//! ]);
//! let quantized = MedianCut::new(2).quantize(&rgb, None).unwrap();
//!
//! assert_eq!(quantized.palette.colors(), &[Rgb::new(5, 5, 5), Rgb::new(245, 245, 245)]);
//! assert_eq!(quantized.assignment.indices(), &[0, 0, 1, 1]);
//! ```

mod assignment;
mod error;
mod median_cut;
mod palette;

pub use assignment::PixelAssignment;
pub use error::PaletteError;
pub use median_cut::{MedianCut, Quantized};
pub use palette::{Palette, MAX_PALETTE_SIZE};
