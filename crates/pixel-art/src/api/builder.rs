//! Pixelizer builder -- the ergonomic entry point for the crate.
//!
//! [`Pixelizer`] wraps [`ProcessingParameters`] with fluent configuration
//! and runs the pipeline on any number of images.

use super::error::PipelineError;
use super::params::ProcessingParameters;
use super::pipeline::{run, PipelineOutput};
use crate::color::Rgb;
use crate::raster::RasterImage;

/// Reusable pixel-art converter.
///
/// - Configuration methods consume and return `self`
/// - [`run()`](Self::run) and [`process()`](Self::process) take `&self`,
///   so one converter can serve many images (and threads)
/// - Parameters are validated on every run, never at configuration time
///
/// # Example
///
/// ```
/// use pixel_art::{Pixelizer, RasterImage, Rgb};
///
/// let pixelizer = Pixelizer::new()
///     .pixel_size(2)
///     .colors(4)
///     .saturation(1.0);
///
/// let image = RasterImage::filled_rgb(4, 4, Rgb::new(10, 20, 30)).unwrap();
/// let output = pixelizer.run(&image).unwrap();
///
/// assert_eq!(output.palette.colors(), &[Rgb::new(10, 20, 30)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pixelizer {
    params: ProcessingParameters,
}

impl Pixelizer {
    /// Create a converter with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter from an existing parameter set.
    pub fn with_parameters(params: ProcessingParameters) -> Self {
        Self { params }
    }

    /// Current parameters.
    #[inline]
    pub fn parameters(&self) -> &ProcessingParameters {
        &self.params
    }

    /// Set the pixel block size.
    #[inline]
    pub fn pixel_size(mut self, size: u32) -> Self {
        self.params.pixel_size = size;
        self
    }

    /// Set the maximum palette size.
    #[inline]
    pub fn colors(mut self, colors: u32) -> Self {
        self.params.colors = colors;
        self
    }

    /// Set the contrast multiplier.
    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.params.contrast = factor;
        self
    }

    /// Set the saturation multiplier.
    #[inline]
    pub fn saturation(mut self, factor: f32) -> Self {
        self.params.saturation = factor;
        self
    }

    /// Flatten transparent output onto `color`.
    #[inline]
    pub fn flatten_onto(mut self, color: Rgb) -> Self {
        self.params.background = color;
        self.params.composite = true;
        self
    }

    /// Keep transparency in the output (the default).
    #[inline]
    pub fn preserve_transparency(mut self) -> Self {
        self.params.composite = false;
        self
    }

    /// Run the pipeline, returning image, palette and assignment.
    pub fn run(&self, image: &RasterImage) -> Result<PipelineOutput, PipelineError> {
        run(image, &self.params)
    }

    /// Run the pipeline, returning only the image.
    pub fn process(&self, image: &RasterImage) -> Result<RasterImage, PipelineError> {
        self.run(image).map(|output| output.image)
    }
}
