//! The [`Enhancer`] stage.

use crate::color::{LUMA_B, LUMA_G, LUMA_R};
use crate::raster::{try_alloc, AllocError, RasterImage};

/// Fixed reference point for contrast scaling.
pub const NEUTRAL_GRAY: f32 = 128.0;

/// Applies contrast, then saturation, to the RGB samples of an image.
///
/// The enhancer trusts its factors; range checking happens once, in
/// [`ProcessingParameters::validate`](crate::ProcessingParameters::validate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enhancer {
    contrast: f32,
    saturation: f32,
}

impl Enhancer {
    #[inline]
    pub fn new(contrast: f32, saturation: f32) -> Self {
        Self {
            contrast,
            saturation,
        }
    }

    /// Whether this enhancer changes anything.
    #[inline]
    pub fn is_identity(&self) -> bool {
        !self.adjusts_contrast() && !self.adjusts_saturation()
    }

    #[inline]
    fn adjusts_contrast(&self) -> bool {
        (self.contrast - 1.0).abs() > f32::EPSILON
    }

    #[inline]
    fn adjusts_saturation(&self) -> bool {
        (self.saturation - 1.0).abs() > f32::EPSILON
    }

    /// Enhance an image, returning a new image of the same shape.
    ///
    /// # Errors
    ///
    /// [`AllocError`] if the output buffer cannot be allocated.
    pub fn enhance(&self, image: &RasterImage) -> Result<RasterImage, AllocError> {
        let input = image.samples();
        let mut out = try_alloc(input.len())?;

        if self.is_identity() {
            out.extend_from_slice(input);
        } else {
            let channels = image.channels();
            for pixel in input.chunks_exact(channels) {
                let [r, g, b] = self.enhance_rgb([pixel[0], pixel[1], pixel[2]]);
                out.extend_from_slice(&[r, g, b]);
                out.extend_from_slice(&pixel[3..]);
            }
        }

        Ok(RasterImage::from_parts(
            image.width(),
            image.height(),
            image.layout(),
            out,
        ))
    }

    /// Enhance a single RGB triple.
    pub fn enhance_rgb(&self, rgb: [u8; 3]) -> [u8; 3] {
        let mut v = rgb.map(f32::from);

        if self.adjusts_contrast() {
            v = v.map(|s| adjust_contrast(s, self.contrast));
        }

        if self.adjusts_saturation() {
            let luma = LUMA_R * v[0] + LUMA_G * v[1] + LUMA_B * v[2];
            v = v.map(|s| adjust_saturation(s, luma, self.saturation));
        }

        v.map(|s| s.round().clamp(0.0, 255.0) as u8)
    }
}

impl Default for Enhancer {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

#[inline]
fn adjust_contrast(value: f32, factor: f32) -> f32 {
    (NEUTRAL_GRAY + (value - NEUTRAL_GRAY) * factor).clamp(0.0, 255.0)
}

#[inline]
fn adjust_saturation(value: f32, luma: f32, factor: f32) -> f32 {
    (luma + (value - luma) * factor).clamp(0.0, 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ChannelLayout;

    fn rgba(pixels: &[[u8; 4]]) -> RasterImage {
        let samples = pixels.iter().flatten().copied().collect();
        RasterImage::new(pixels.len() as u32, 1, ChannelLayout::Rgba, samples).unwrap()
    }

    #[test]
    fn test_identity_factors_copy_samples() {
        let image = rgba(&[[1, 2, 3, 4], [250, 128, 0, 255]]);
        let out = Enhancer::new(1.0, 1.0).enhance(&image).unwrap();
        assert_eq!(out, image);
    }

    #[test]
    fn test_contrast_midpoint_unchanged() {
        let e = Enhancer::new(2.0, 1.0);
        assert_eq!(e.enhance_rgb([128, 128, 128]), [128, 128, 128]);
    }

    #[test]
    fn test_contrast_scales_deviation() {
        // 2.0 doubles the distance from 128, 0.5 halves it
        assert_eq!(Enhancer::new(2.0, 1.0).enhance_rgb([100, 150, 128]), [72, 172, 128]);
        assert_eq!(Enhancer::new(0.5, 1.0).enhance_rgb([100, 150, 128]), [114, 139, 128]);
    }

    #[test]
    fn test_contrast_clamps() {
        assert_eq!(Enhancer::new(2.0, 1.0).enhance_rgb([0, 255, 10]), [0, 255, 0]);
    }

    #[test]
    fn test_zero_saturation_yields_luma_gray() {
        let [r, g, b] = Enhancer::new(1.0, 0.0).enhance_rgb([255, 0, 0]);
        assert_eq!((r, g, b), (76, 76, 76));
    }

    #[test]
    fn test_saturation_boost_moves_away_from_luma() {
        let input = [150, 100, 100];
        let out = Enhancer::new(1.0, 2.0).enhance_rgb(input);
        assert!(out[0] > input[0], "red should grow: {out:?}");
        assert!(out[1] < input[1], "green should shrink: {out:?}");
    }

    #[test]
    fn test_gray_is_saturation_invariant() {
        for s in [0.0, 0.5, 2.0] {
            assert_eq!(Enhancer::new(1.0, s).enhance_rgb([90, 90, 90]), [90, 90, 90]);
        }
    }

    #[test]
    fn test_contrast_applied_before_saturation() {
        // Contrast first: (200,100,100) -> (255,72,72), then grayscale of that
        let ordered = Enhancer::new(2.0, 0.0).enhance_rgb([200, 100, 100]);
        let luma = 0.299 * 255.0 + 0.587 * 72.0 + 0.114 * 72.0;
        let expected = (luma as f32).round() as u8;
        assert_eq!(ordered, [expected; 3]);
    }

    #[test]
    fn test_alpha_passes_through() {
        let image = rgba(&[[10, 200, 30, 0], [10, 200, 30, 128]]);
        let out = Enhancer::new(1.7, 0.3).enhance(&image).unwrap();
        assert_eq!(out.pixel(0, 0)[3], 0);
        assert_eq!(out.pixel(1, 0)[3], 128);
        assert_eq!(out.layout(), ChannelLayout::Rgba);
    }
}
