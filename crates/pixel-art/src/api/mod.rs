//! Public API for the pixel-art crate.
//!
//! This module provides the pipeline entry points ([`process`], [`run`] and
//! the [`Pixelizer`] builder), the validated [`ProcessingParameters`], and
//! the [`PipelineError`] failure type.

mod builder;
mod error;
mod params;
mod pipeline;

pub use builder::Pixelizer;
pub use error::{ParameterError, PipelineError, Stage};
pub use params::{
    ProcessingParameters, COLORS_RANGE, CONTRAST_RANGE, PIXEL_SIZE_RANGE, SATURATION_RANGE,
};
pub use pipeline::{process, process_raw, run, PipelineOutput};
