//! Single-purpose sample planes derived from a [`RasterImage`](super::RasterImage).

use crate::color::Rgb;

/// What a [`ChannelPlane`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneKind {
    /// Interleaved R, G, B samples (3 per pixel)
    Rgb,
    /// Alpha samples (1 per pixel)
    Alpha,
}

impl PlaneKind {
    #[inline]
    pub fn samples_per_pixel(self) -> usize {
        match self {
            PlaneKind::Rgb => 3,
            PlaneKind::Alpha => 1,
        }
    }
}

/// An RGB or alpha plane with the same dimensions as its source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPlane {
    width: u32,
    height: u32,
    kind: PlaneKind,
    samples: Vec<u8>,
}

impl ChannelPlane {
    /// Wrap a sample buffer as a plane.
    ///
    /// Callers inside the crate build buffers of the right size; the length
    /// is only checked in debug builds.
    pub fn new(width: u32, height: u32, kind: PlaneKind, samples: Vec<u8>) -> Self {
        debug_assert_eq!(
            samples.len(),
            width as usize * height as usize * kind.samples_per_pixel(),
            "plane buffer length must match {width}x{height}x{}",
            kind.samples_per_pixel(),
        );
        Self {
            width,
            height,
            kind,
            samples,
        }
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
    pub fn kind(&self) -> PlaneKind {
        self.kind
    }

    #[inline]
    pub fn samples_per_pixel(&self) -> usize {
        self.kind.samples_per_pixel()
    }

    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    #[inline]
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Samples of the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let spp = self.samples_per_pixel();
        let start = (y as usize * self.width as usize + x as usize) * spp;
        &self.samples[start..start + spp]
    }

    /// Iterate over RGB pixels. Only meaningful for [`PlaneKind::Rgb`].
    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        debug_assert_eq!(self.kind, PlaneKind::Rgb);
        self.samples.chunks_exact(3).map(Rgb::from_slice)
    }

    /// True when every alpha sample is 255. Only meaningful for [`PlaneKind::Alpha`].
    pub fn is_opaque(&self) -> bool {
        debug_assert_eq!(self.kind, PlaneKind::Alpha);
        self.samples.iter().all(|&a| a == u8::MAX)
    }
}
