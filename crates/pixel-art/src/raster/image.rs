//! Interleaved RGB / RGBA image.

use super::alloc::checked_len;
use super::ImageError;
use crate::color::Rgb;

/// Channel layout of a [`RasterImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Three samples per pixel: R, G, B
    Rgb,
    /// Four samples per pixel: R, G, B, A
    Rgba,
}

impl ChannelLayout {
    /// Samples per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    /// Layout for a channel count, if supported.
    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            3 => Some(ChannelLayout::Rgb),
            4 => Some(ChannelLayout::Rgba),
            _ => None,
        }
    }
}

/// A rectangular 8-bit image, row-major, channels interleaved.
///
/// Construction validates the shape, so every `RasterImage` in circulation
/// has non-zero dimensions and exactly `width * height * channels` samples.
///
/// # Example
///
/// ```
/// use pixel_art::{ChannelLayout, RasterImage};
///
/// let image = RasterImage::new(2, 1, ChannelLayout::Rgba, vec![255, 0, 0, 255, 0, 0, 255, 0])
///     .unwrap();
/// assert!(image.has_alpha());
/// assert_eq!(image.pixel(1, 0), &[0, 0, 255, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    samples: Vec<u8>,
}

impl RasterImage {
    /// Create an image from interleaved samples.
    ///
    /// # Errors
    ///
    /// - [`ImageError::ZeroDimension`] if either dimension is zero
    /// - [`ImageError::SampleCountMismatch`] if `samples` has the wrong length
    /// - [`ImageError::DimensionsOverflow`] if the sample count overflows `usize`
    pub fn new(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        samples: Vec<u8>,
    ) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::ZeroDimension { width, height });
        }
        let expected = checked_len(width as usize, height as usize, layout.channels())
            .map_err(|_| ImageError::DimensionsOverflow { width, height })?;
        if samples.len() != expected {
            return Err(ImageError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            samples,
        })
    }

    /// Create an image from a raw channel count, as reported by a decoder.
    ///
    /// # Errors
    ///
    /// [`ImageError::UnsupportedChannels`] for anything other than 3 or 4,
    /// otherwise as [`RasterImage::new`].
    pub fn from_raw_channels(
        width: u32,
        height: u32,
        channels: usize,
        samples: Vec<u8>,
    ) -> Result<Self, ImageError> {
        let layout =
            ChannelLayout::from_channels(channels).ok_or(ImageError::UnsupportedChannels(channels))?;
        Self::new(width, height, layout, samples)
    }

    /// Assemble an image from a buffer the caller sized itself.
    pub(crate) fn from_parts(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        samples: Vec<u8>,
    ) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(
            samples.len(),
            width as usize * height as usize * layout.channels()
        );
        Self {
            width,
            height,
            layout,
            samples,
        }
    }

    /// Uniform image filled with one RGB color.
    pub fn filled_rgb(width: u32, height: u32, color: Rgb) -> Result<Self, ImageError> {
        let count = checked_len(width as usize, height as usize, 1)
            .map_err(|_| ImageError::DimensionsOverflow { width, height })?;
        let samples = color.to_bytes().repeat(count);
        Self::new(width, height, ChannelLayout::Rgb, samples)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Whether the image carries an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.layout == ChannelLayout::Rgba
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Interleaved samples, row-major.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Consume the image, returning its sample buffer.
    #[inline]
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Samples of the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let c = self.channels();
        let start = (y as usize * self.width as usize + x as usize) * c;
        &self.samples[start..start + c]
    }

    /// RGB part of the pixel at (x, y).
    #[inline]
    pub fn rgb_at(&self, x: u32, y: u32) -> Rgb {
        Rgb::from_slice(self.pixel(x, y))
    }

    /// Alpha of the pixel at (x, y); 255 for images without alpha.
    #[inline]
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if self.has_alpha() {
            self.pixel(x, y)[3]
        } else {
            255
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_dimensions() {
        assert_eq!(
            RasterImage::new(0, 4, ChannelLayout::Rgb, vec![]),
            Err(ImageError::ZeroDimension {
                width: 0,
                height: 4
            })
        );
        assert_eq!(
            RasterImage::new(2, 2, ChannelLayout::Rgb, vec![0; 11]),
            Err(ImageError::SampleCountMismatch {
                expected: 12,
                actual: 11
            })
        );
    }

    #[test]
    fn test_from_raw_channels_rejects_gray() {
        assert_eq!(
            RasterImage::from_raw_channels(1, 1, 1, vec![0]),
            Err(ImageError::UnsupportedChannels(1))
        );
        assert_eq!(
            RasterImage::from_raw_channels(1, 1, 2, vec![0, 0]),
            Err(ImageError::UnsupportedChannels(2))
        );
        let rgba = RasterImage::from_raw_channels(1, 1, 4, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(rgba.layout(), ChannelLayout::Rgba);
    }

    #[test]
    fn test_pixel_access() {
        let image = RasterImage::new(
            2,
            2,
            ChannelLayout::Rgb,
            vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4],
        )
        .unwrap();
        assert_eq!(image.rgb_at(0, 1), Rgb::new(3, 3, 3));
        assert_eq!(image.rgb_at(1, 1), Rgb::new(4, 4, 4));
        assert_eq!(image.alpha_at(1, 0), 255);
        assert_eq!(image.pixel_count(), 4);
    }

    #[test]
    fn test_filled_rgb() {
        let image = RasterImage::filled_rgb(3, 2, Rgb::new(9, 8, 7)).unwrap();
        assert_eq!(image.samples().len(), 18);
        assert!(image.samples().chunks_exact(3).all(|p| p == [9, 8, 7]));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_pixel_out_of_bounds_panics() {
        let image = RasterImage::filled_rgb(1, 1, Rgb::BLACK).unwrap();
        let _ = image.pixel(1, 0);
    }
}
