//! The [`Pixelator`] stage.

use crate::raster::{try_alloc, AllocError, ChannelPlane};

/// Replaces every `block x block` tile of a plane with one sample.
///
/// # Example
///
/// ```
/// use pixel_art::{ChannelPlane, PlaneKind, Pixelator};
///
/// let alpha = ChannelPlane::new(3, 1, PlaneKind::Alpha, vec![10, 20, 30]);
/// let out = Pixelator::new(2).pixelate(&alpha).unwrap();
/// assert_eq!(out.samples(), &[10, 10, 30]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixelator {
    block: u32,
}

impl Pixelator {
    /// Create a pixelator for the given block size.
    ///
    /// The pipeline only builds pixelators from validated parameters
    /// (2..=50); a block of 1 is accepted here and is the identity.
    ///
    /// # Panics
    ///
    /// Panics if `block` is zero.
    #[inline]
    pub fn new(block: u32) -> Self {
        assert!(block > 0, "block size must be positive");
        Self { block }
    }

    #[inline]
    pub fn block(&self) -> u32 {
        self.block
    }

    /// Dimensions of the reduced plane: `(ceil(W/B), ceil(H/B))`.
    #[inline]
    pub fn downscaled_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        (width.div_ceil(self.block), height.div_ceil(self.block))
    }

    /// Pixelate a plane: downscale, then upscale back to the original size.
    pub fn pixelate(&self, plane: &ChannelPlane) -> Result<ChannelPlane, AllocError> {
        let small = self.downscale(plane)?;
        self.upscale(&small, plane.width(), plane.height())
    }

    /// Nearest-neighbor reduction: one sample per block, taken from the
    /// block's top-left source coordinate.
    pub fn downscale(&self, plane: &ChannelPlane) -> Result<ChannelPlane, AllocError> {
        let spp = plane.samples_per_pixel();
        let (sw, sh) = self.downscaled_dimensions(plane.width(), plane.height());
        let mut out = try_alloc(sw as usize * sh as usize * spp)?;

        for by in 0..sh {
            for bx in 0..sw {
                out.extend_from_slice(plane.pixel(bx * self.block, by * self.block));
            }
        }

        Ok(ChannelPlane::new(sw, sh, plane.kind(), out))
    }

    /// Nearest-neighbor enlargement of a reduced plane to `width x height`.
    ///
    /// Every reduced sample fills its `block x block` footprint, clipped at
    /// the right and bottom edges.
    pub fn upscale(
        &self,
        small: &ChannelPlane,
        width: u32,
        height: u32,
    ) -> Result<ChannelPlane, AllocError> {
        let spp = small.samples_per_pixel();
        let block = self.block as usize;
        let row_len = width as usize * spp;
        let mut out = try_alloc(row_len * height as usize)?;
        let mut row = try_alloc(row_len)?;

        let mut y = 0usize;
        for by in 0..small.height() {
            row.clear();
            for bx in 0..small.width() {
                let start = bx as usize * block;
                let span = block.min(width as usize - start);
                let sample = small.pixel(bx, by);
                for _ in 0..span {
                    row.extend_from_slice(sample);
                }
            }

            let rows = block.min(height as usize - y);
            for _ in 0..rows {
                out.extend_from_slice(&row);
            }
            y += rows;
        }

        Ok(ChannelPlane::new(width, height, small.kind(), out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PlaneKind;

    /// Plane where every pixel's samples encode its coordinate.
    fn coordinate_plane(width: u32, height: u32) -> ChannelPlane {
        let mut samples = Vec::new();
        for y in 0..height {
            for x in 0..width {
                samples.extend_from_slice(&[x as u8, y as u8, 7]);
            }
        }
        ChannelPlane::new(width, height, PlaneKind::Rgb, samples)
    }

    #[test]
    fn test_downscaled_dimensions_round_up() {
        let p = Pixelator::new(4);
        assert_eq!(p.downscaled_dimensions(8, 8), (2, 2));
        assert_eq!(p.downscaled_dimensions(9, 3), (3, 1));
        assert_eq!(p.downscaled_dimensions(1, 1), (1, 1));
    }

    #[test]
    fn test_downscale_picks_top_left() {
        let plane = coordinate_plane(5, 5);
        let small = Pixelator::new(2).downscale(&plane).unwrap();
        assert_eq!((small.width(), small.height()), (3, 3));
        assert_eq!(small.pixel(0, 0), &[0, 0, 7]);
        assert_eq!(small.pixel(1, 0), &[2, 0, 7]);
        assert_eq!(small.pixel(2, 2), &[4, 4, 7]);
    }

    #[test]
    fn test_pixelate_keeps_dimensions_and_fills_blocks() {
        let plane = coordinate_plane(5, 3);
        let out = Pixelator::new(2).pixelate(&plane).unwrap();
        assert_eq!((out.width(), out.height()), (5, 3));

        for y in 0..3 {
            for x in 0..5 {
                let expected = [(x / 2 * 2) as u8, (y / 2 * 2) as u8, 7];
                assert_eq!(out.pixel(x, y), &expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_block_larger_than_image() {
        let plane = coordinate_plane(3, 2);
        let out = Pixelator::new(50).pixelate(&plane).unwrap();
        assert!(out.samples().chunks_exact(3).all(|p| p == [0, 0, 7]));
    }

    #[test]
    fn test_alpha_plane_pixelates_like_rgb() {
        let alpha = ChannelPlane::new(4, 1, PlaneKind::Alpha, vec![0, 255, 255, 0]);
        let out = Pixelator::new(2).pixelate(&alpha).unwrap();
        assert_eq!(out.samples(), &[0, 0, 255, 255]);
        assert_eq!(out.kind(), PlaneKind::Alpha);
    }

    #[test]
    fn test_pixelate_is_deterministic() {
        let plane = coordinate_plane(13, 9);
        let p = Pixelator::new(3);
        assert_eq!(p.pixelate(&plane).unwrap(), p.pixelate(&plane).unwrap());
    }

    #[test]
    #[should_panic(expected = "block size must be positive")]
    fn test_zero_block_panics() {
        let _ = Pixelator::new(0);
    }
}
