//! pixel-art: Deterministic image-to-pixel-art conversion
//!
//! This library turns an 8-bit RGB or RGBA raster into blocky, low-palette
//! pixel art. Every stage is a pure function of its inputs, so the same
//! image and parameters always produce byte-identical output.
//!
//! # Quick Start
//!
//! The [`Pixelizer`] builder is the primary entry point:
//!
//! ```
//! use pixel_art::{Pixelizer, RasterImage, Rgb};
//!
//! let image = RasterImage::filled_rgb(16, 16, Rgb::new(200, 80, 40)).unwrap();
//!
//! let pixelizer = Pixelizer::new().pixel_size(4).colors(16);
//! let output = pixelizer.run(&image).unwrap();
//!
//! assert_eq!(output.image.width(), 16);
//! assert!(output.palette.len() <= 16);
//! ```
//!
//! For one-off calls with an explicit parameter set, use [`process()`]:
//!
//! ```
//! use pixel_art::{process, ProcessingParameters, RasterImage, Rgb};
//!
//! let image = RasterImage::filled_rgb(8, 8, Rgb::WHITE).unwrap();
//! let params = ProcessingParameters::new().pixel_size(2).colors(2);
//! let out = process(&image, &params).unwrap();
//! assert_eq!(out.samples().len(), 8 * 8 * 3);
//! ```
//!
//! # Pipeline Overview
//!
//! ```text
//! RasterImage (RGB or RGBA)
//!     |
//!     v
//! [Validate]          parameters checked before any pixel is touched
//!     |
//!     v
//! [Enhance]           contrast around 128, then saturation around luma
//!     |
//!     v
//! [Extract]           split into RGB plane + optional alpha plane
//!     |
//!     +--------------------------+
//!     v                          v
//! [Pixelate RGB]          [Pixelate alpha]     same block grid
//!     |                          |
//!     v                          |
//! [Quantize]  <-- weights -------+             median cut, <= K colors
//!     |                          |
//!     v                          v
//! [Composite]  re-attach alpha, or flatten onto a background
//!     |
//!     v
//! RasterImage (same size; RGB when flattened)
//! ```
//!
//! # Determinism
//!
//! - Enhancement uses `f32` arithmetic with a single rounding per channel
//! - Pixelation samples the top-left pixel of each block
//! - Median cut breaks every tie (channel, cluster, nearest color) by a
//!   fixed order, so palettes never depend on hashing or thread timing
//!
//! # Transparency
//!
//! Alpha is never enhanced or quantized. It is pixelated on the same grid
//! as color, and it weights palette construction so fully transparent
//! pixels cannot claim palette slots.

pub mod alpha;
pub mod api;
pub mod color;
pub mod enhance;
pub mod pixelate;
pub mod quantize;
pub mod raster;


pub use alpha::{blend, extract_alpha, Compositor, ExtractedPlanes};
pub use api::{
    process, process_raw, run, ParameterError, PipelineError, PipelineOutput, Pixelizer,
    ProcessingParameters, Stage,
};
pub use color::{ParseColorError, Rgb};
pub use enhance::Enhancer;
pub use pixelate::Pixelator;
pub use quantize::{MedianCut, Palette, PaletteError, PixelAssignment, Quantized, MAX_PALETTE_SIZE};
pub use raster::{AllocError, ChannelLayout, ChannelPlane, ImageError, PlaneKind, RasterImage};
