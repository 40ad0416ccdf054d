//! Plane recombination and background flattening.

use crate::color::Rgb;
use crate::raster::{try_alloc, AllocError, ChannelLayout, ChannelPlane, RasterImage};

/// Blend one foreground sample over a background sample.
///
/// Integer form of `floor(fg * a/255 + bg * (1 - a/255))`.
///
/// ```
/// use pixel_art::blend;
/// assert_eq!(blend(200, 100, 255), 200);
/// assert_eq!(blend(200, 100, 0), 100);
/// assert_eq!(blend(255, 0, 128), 128);
/// ```
#[inline]
pub fn blend(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((fg as u32 * a + bg as u32 * (255 - a)) / 255) as u8
}

/// Final pipeline stage: builds the output image from the processed planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Compositor {
    background: Option<Rgb>,
}

impl Compositor {
    /// `Some(color)` flattens transparent images onto `color`;
    /// `None` keeps the alpha channel.
    #[inline]
    pub fn new(background: Option<Rgb>) -> Self {
        Self { background }
    }

    #[inline]
    pub fn background(&self) -> Option<Rgb> {
        self.background
    }

    /// Combine an RGB plane with an optional alpha plane.
    ///
    /// Without a background, or without alpha, the planes are interleaved
    /// verbatim. With both, every pixel is blended onto the background and
    /// the result is a 3-channel image.
    pub fn compose(
        &self,
        rgb: ChannelPlane,
        alpha: Option<ChannelPlane>,
    ) -> Result<RasterImage, AllocError> {
        let (width, height) = (rgb.width(), rgb.height());

        let Some(alpha) = alpha else {
            return Ok(RasterImage::from_parts(
                width,
                height,
                ChannelLayout::Rgb,
                rgb.into_samples(),
            ));
        };

        match self.background {
            Some(bg) => {
                let mut out = try_alloc(rgb.samples().len())?;
                for (color, &a) in rgb.samples().chunks_exact(3).zip(alpha.samples()) {
                    out.extend_from_slice(&flatten_pixel(color, a, bg));
                }
                Ok(RasterImage::from_parts(width, height, ChannelLayout::Rgb, out))
            }
            None => {
                let mut out = try_alloc(rgb.pixel_count() * 4)?;
                for (color, &a) in rgb.samples().chunks_exact(3).zip(alpha.samples()) {
                    out.extend_from_slice(color);
                    out.push(a);
                }
                Ok(RasterImage::from_parts(width, height, ChannelLayout::Rgba, out))
            }
        }
    }

    /// Flatten an interleaved image onto the background.
    ///
    /// RGB images and compositors without a background return a copy of
    /// the input. Used at the codec boundary for formats without alpha.
    pub fn flatten(&self, image: &RasterImage) -> Result<RasterImage, AllocError> {
        let (Some(bg), true) = (self.background, image.has_alpha()) else {
            let mut out = try_alloc(image.samples().len())?;
            out.extend_from_slice(image.samples());
            return Ok(RasterImage::from_parts(
                image.width(),
                image.height(),
                image.layout(),
                out,
            ));
        };

        let mut out = try_alloc(image.pixel_count() * 3)?;
        for pixel in image.samples().chunks_exact(4) {
            out.extend_from_slice(&flatten_pixel(&pixel[..3], pixel[3], bg));
        }
        Ok(RasterImage::from_parts(
            image.width(),
            image.height(),
            ChannelLayout::Rgb,
            out,
        ))
    }
}

#[inline]
fn flatten_pixel(color: &[u8], alpha: u8, bg: Rgb) -> [u8; 3] {
    [
        blend(color[0], bg.r, alpha),
        blend(color[1], bg.g, alpha),
        blend(color[2], bg.b, alpha),
    ]
}
