//! The conversion pipeline.
//!
//! ```text
//! Validate -> Enhance -> Extract -> Pixelate(RGB[, alpha]) -> Quantize -> Composite
//! ```
//!
//! Each stage consumes the previous stage's output and allocates its own.
//! Any failure ends the run immediately with the stage it came from; no
//! partial output is returned and no state survives between runs.

use super::error::{PipelineError, Stage};
use super::params::ProcessingParameters;
use crate::alpha::{extract_alpha, Compositor};
use crate::enhance::Enhancer;
use crate::pixelate::Pixelator;
use crate::quantize::{MedianCut, Palette, PixelAssignment};
use crate::raster::RasterImage;

/// Successful pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Output image, same dimensions as the input. Same channel layout
    /// unless compositing flattened it to RGB.
    pub image: RasterImage,
    /// The palette the image was reduced to
    pub palette: Palette,
    /// Palette index of every output pixel
    pub assignment: PixelAssignment,
}

/// Convert `image` to pixel art and return only the resulting image.
///
/// The input is borrowed and never modified, so it stays usable whatever
/// the outcome.
///
/// # Example
///
/// ```
/// use pixel_art::{process, ProcessingParameters, RasterImage, Rgb};
///
/// let image = RasterImage::filled_rgb(10, 6, Rgb::new(30, 120, 200)).unwrap();
/// let params = ProcessingParameters::new().pixel_size(4).colors(8);
///
/// let out = process(&image, &params).unwrap();
/// assert_eq!((out.width(), out.height()), (10, 6));
/// ```
pub fn process(
    image: &RasterImage,
    params: &ProcessingParameters,
) -> Result<RasterImage, PipelineError> {
    run(image, params).map(|output| output.image)
}

/// Build a [`RasterImage`] from decoder output and process it.
///
/// Parameters are validated before the image shape, so a bad parameter set
/// is reported even for a malformed buffer.
pub fn process_raw(
    width: u32,
    height: u32,
    channels: usize,
    samples: Vec<u8>,
    params: &ProcessingParameters,
) -> Result<RasterImage, PipelineError> {
    params.validate()?;
    let image = RasterImage::from_raw_channels(width, height, channels, samples)?;
    process(&image, params)
}

/// Run the full pipeline, returning the image together with its palette.
pub fn run(
    image: &RasterImage,
    params: &ProcessingParameters,
) -> Result<PipelineOutput, PipelineError> {
    params.validate()?;

    let _span = tracing::debug_span!(
        "pipeline",
        width = image.width(),
        height = image.height(),
        alpha = image.has_alpha(),
        pixel_size = params.pixel_size,
        colors = params.colors,
    )
    .entered();

    tracing::debug!(
        stage = %Stage::Enhance,
        contrast = params.contrast,
        saturation = params.saturation
    );
    let enhanced = Enhancer::new(params.contrast, params.saturation)
        .enhance(image)
        .map_err(PipelineError::exhausted(Stage::Enhance))?;

    tracing::debug!(stage = %Stage::Extract);
    let planes = extract_alpha(&enhanced).map_err(PipelineError::exhausted(Stage::Extract))?;
    drop(enhanced);

    tracing::debug!(stage = %Stage::Pixelate, has_alpha = planes.has_alpha());
    let pixelator = Pixelator::new(params.pixel_size);
    let rgb = pixelator
        .pixelate(&planes.rgb)
        .map_err(PipelineError::exhausted(Stage::Pixelate))?;
    let alpha = planes
        .alpha
        .as_ref()
        .map(|alpha| pixelator.pixelate(alpha))
        .transpose()
        .map_err(PipelineError::exhausted(Stage::Pixelate))?;
    drop(planes);

    tracing::debug!(stage = %Stage::Quantize);
    let quantized = MedianCut::new(params.colors as usize)
        .quantize(&rgb, alpha.as_ref())
        .map_err(PipelineError::exhausted(Stage::Quantize))?;
    drop(rgb);
    let quantized_rgb = quantized
        .to_rgb_plane()
        .map_err(PipelineError::exhausted(Stage::Quantize))?;

    let background = params.compositing_background();
    tracing::debug!(stage = %Stage::Composite, flatten = background.is_some());
    let image = Compositor::new(background)
        .compose(quantized_rgb, alpha)
        .map_err(PipelineError::exhausted(Stage::Composite))?;

    tracing::debug!(palette = quantized.palette.len(), "pipeline finished");
    Ok(PipelineOutput {
        image,
        palette: quantized.palette,
        assignment: quantized.assignment,
    })
}
