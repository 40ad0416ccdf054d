//! RGB / alpha plane separation.

use crate::raster::{try_alloc, AllocError, ChannelPlane, PlaneKind, RasterImage};

/// The planes of a split image.
#[derive(Debug, Clone)]
pub struct ExtractedPlanes {
    /// RGB samples, 3 per pixel
    pub rgb: ChannelPlane,
    /// Alpha samples, present only for 4-channel sources
    pub alpha: Option<ChannelPlane>,
}

impl ExtractedPlanes {
    /// Whether the source image carried an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }
}

/// Split an image into an RGB plane and, for RGBA images, an alpha plane.
///
/// An RGBA image whose alpha is fully opaque still reports `has_alpha`;
/// transparency tracking follows the channel layout, not the content.
pub fn extract_alpha(image: &RasterImage) -> Result<ExtractedPlanes, AllocError> {
    let (width, height) = (image.width(), image.height());
    let pixels = image.pixel_count();

    let mut rgb = try_alloc(pixels * 3)?;
    if !image.has_alpha() {
        rgb.extend_from_slice(image.samples());
        return Ok(ExtractedPlanes {
            rgb: ChannelPlane::new(width, height, PlaneKind::Rgb, rgb),
            alpha: None,
        });
    }

    let mut alpha = try_alloc(pixels)?;
    for pixel in image.samples().chunks_exact(4) {
        rgb.extend_from_slice(&pixel[..3]);
        alpha.push(pixel[3]);
    }

    Ok(ExtractedPlanes {
        rgb: ChannelPlane::new(width, height, PlaneKind::Rgb, rgb),
        alpha: Some(ChannelPlane::new(width, height, PlaneKind::Alpha, alpha)),
    })
}
