//! Per-pixel palette indices.

use super::Palette;
use crate::raster::{try_alloc, AllocError, ChannelPlane, PlaneKind};

/// One palette index per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelAssignment {
    indices: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelAssignment {
    pub(crate) fn new(indices: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(indices.len(), width as usize * height as usize);
        Self {
            indices,
            width,
            height,
        }
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Palette index of the pixel at (x, y).
    #[inline]
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        self.indices[y as usize * self.width as usize + x as usize]
    }

    /// Render the assignment through `palette` as an RGB plane.
    pub fn render(&self, palette: &Palette) -> Result<ChannelPlane, AllocError> {
        let mut out = try_alloc(self.indices.len() * 3)?;
        let colors = palette.colors();
        for &idx in &self.indices {
            out.extend_from_slice(&colors[idx as usize].to_bytes());
        }
        Ok(ChannelPlane::new(self.width, self.height, PlaneKind::Rgb, out))
    }
}
