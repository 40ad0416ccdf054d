//! Processing parameters and their validation.

use std::fmt::Display;
use std::ops::RangeInclusive;

use super::error::ParameterError;
use crate::color::Rgb;

/// Accepted block sizes.
pub const PIXEL_SIZE_RANGE: RangeInclusive<u32> = 2..=50;
/// Accepted palette sizes.
pub const COLORS_RANGE: RangeInclusive<u32> = 2..=256;
/// Accepted contrast factors.
pub const CONTRAST_RANGE: RangeInclusive<f32> = 0.5..=2.0;
/// Accepted saturation factors.
pub const SATURATION_RANGE: RangeInclusive<f32> = 0.0..=2.0;

/// Everything the pipeline needs to know about one conversion.
///
/// # Defaults
///
/// - Pixel size: 8
/// - Colors: 32
/// - Contrast: 1.0 (unchanged)
/// - Saturation: 1.2 (slight boost)
/// - Background: white, compositing off (transparency is preserved)
///
/// # Example
///
/// ```
/// use pixel_art::{ProcessingParameters, Rgb};
///
/// let params = ProcessingParameters::new()
///     .pixel_size(4)
///     .colors(16)
///     .background(Rgb::BLACK)
///     .composite(true);
/// assert!(params.validate().is_ok());
///
/// assert!(ProcessingParameters::new().colors(1).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingParameters {
    /// Edge length of the square pixel blocks.
    pub pixel_size: u32,

    /// Maximum number of palette colors (`K`).
    pub colors: u32,

    /// Contrast multiplier around neutral gray 128.
    ///
    /// - 1.0 = no change
    /// - 0.5 = halves deviation from gray
    /// - 2.0 = doubles it
    pub contrast: f32,

    /// Saturation multiplier around each pixel's luma.
    ///
    /// - 0.0 = grayscale
    /// - 1.0 = no change
    /// - 2.0 = doubled chroma
    pub saturation: f32,

    /// Background used when `composite` is set.
    pub background: Rgb,

    /// Flatten transparent images onto `background`, producing RGB output.
    pub composite: bool,
}

impl Default for ProcessingParameters {
    fn default() -> Self {
        Self {
            pixel_size: 8,
            colors: 32,
            contrast: 1.0,
            saturation: 1.2,
            background: Rgb::WHITE,
            composite: false,
        }
    }
}

impl ProcessingParameters {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn pixel_size(mut self, size: u32) -> Self {
        self.pixel_size = size;
        self
    }

    #[inline]
    pub fn colors(mut self, colors: u32) -> Self {
        self.colors = colors;
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = factor;
        self
    }

    #[inline]
    pub fn saturation(mut self, factor: f32) -> Self {
        self.saturation = factor;
        self
    }

    #[inline]
    pub fn background(mut self, color: Rgb) -> Self {
        self.background = color;
        self
    }

    #[inline]
    pub fn composite(mut self, enabled: bool) -> Self {
        self.composite = enabled;
        self
    }

    /// The background to flatten onto, if compositing is requested.
    #[inline]
    pub fn compositing_background(&self) -> Option<Rgb> {
        self.composite.then_some(self.background)
    }

    /// Check every field against its range.
    ///
    /// Fields are checked in declaration order and the first violation is
    /// reported. NaN factors are out of range.
    pub fn validate(&self) -> Result<(), ParameterError> {
        check("pixel_size", self.pixel_size, &PIXEL_SIZE_RANGE)?;
        check("colors", self.colors, &COLORS_RANGE)?;
        check("contrast", self.contrast, &CONTRAST_RANGE)?;
        check("saturation", self.saturation, &SATURATION_RANGE)?;
        Ok(())
    }
}

fn check<T>(field: &'static str, value: T, range: &RangeInclusive<T>) -> Result<(), ParameterError>
where
    T: PartialOrd + Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ParameterError {
            field,
            value: value.to_string(),
            range: format!("{}..={}", range.start(), range.end()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let p = ProcessingParameters::default();
        assert_eq!(p.pixel_size, 8);
        assert_eq!(p.colors, 32);
        assert!((p.contrast - 1.0).abs() < f32::EPSILON);
        assert!((p.saturation - 1.2).abs() < f32::EPSILON);
        assert_eq!(p.background, Rgb::WHITE);
        assert!(!p.composite);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_range_edges_are_inclusive() {
        let low = ProcessingParameters::new()
            .pixel_size(2)
            .colors(2)
            .contrast(0.5)
            .saturation(0.0);
        let high = ProcessingParameters::new()
            .pixel_size(50)
            .colors(256)
            .contrast(2.0)
            .saturation(2.0);
        assert!(low.validate().is_ok());
        assert!(high.validate().is_ok());
    }

    #[test]
    fn test_each_field_is_checked() {
        let cases = [
            (ProcessingParameters::new().pixel_size(1), "pixel_size"),
            (ProcessingParameters::new().pixel_size(51), "pixel_size"),
            (ProcessingParameters::new().colors(1), "colors"),
            (ProcessingParameters::new().colors(257), "colors"),
            (ProcessingParameters::new().contrast(3.0), "contrast"),
            (ProcessingParameters::new().contrast(0.49), "contrast"),
            (ProcessingParameters::new().saturation(-0.1), "saturation"),
            (ProcessingParameters::new().saturation(2.5), "saturation"),
        ];
        for (params, field) in cases {
            let err = params.validate().unwrap_err();
            assert_eq!(err.field, field);
        }
    }

    #[test]
    fn test_nan_is_rejected() {
        let err = ProcessingParameters::new()
            .contrast(f32::NAN)
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "contrast");
        assert_eq!(err.range, "0.5..=2");
    }

    #[test]
    fn test_first_violation_reported() {
        let err = ProcessingParameters::new()
            .colors(1)
            .contrast(3.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "colors");
        assert_eq!(err.value, "1");
    }

    #[test]
    fn test_compositing_background() {
        let p = ProcessingParameters::new().background(Rgb::BLACK);
        assert_eq!(p.compositing_background(), None);
        assert_eq!(p.composite(true).compositing_background(), Some(Rgb::BLACK));
    }
}
