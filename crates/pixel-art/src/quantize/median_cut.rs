//! Weighted median-cut quantizer.

use std::collections::HashMap;

use super::{Palette, PixelAssignment, MAX_PALETTE_SIZE};
use crate::color::Rgb;
use crate::raster::{try_alloc, AllocError, ChannelPlane};

/// Weight of an opaque pixel. Alpha-weighted pixels use their alpha
/// directly, so `alpha / 255` relative to an opaque pixel.
const OPAQUE_WEIGHT: u64 = 255;

/// A cluster of distinct colors with accumulated weights.
#[derive(Debug, Clone)]
struct ColorBox {
    entries: Vec<(Rgb, u64)>,
}

impl ColorBox {
    fn new(entries: Vec<(Rgb, u64)>) -> Self {
        Self { entries }
    }

    fn total_weight(&self) -> u64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// (channel, range) of the widest channel; ties resolve R, G, B.
    fn widest_channel(&self) -> (usize, u8) {
        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        for (color, _) in &self.entries {
            for (ch, v) in color.to_bytes().into_iter().enumerate() {
                min[ch] = min[ch].min(v);
                max[ch] = max[ch].max(v);
            }
        }

        let mut best = (0, 0);
        for ch in 0..3 {
            let range = max[ch].saturating_sub(min[ch]);
            if range > best.1 {
                best = (ch, range);
            }
        }
        best
    }

    /// Weighted average of the members, rounded to nearest.
    fn representative(&self) -> Rgb {
        let total = self.total_weight().max(1);
        let mut sums = [0u64; 3];
        for (color, w) in &self.entries {
            for (sum, v) in sums.iter_mut().zip(color.to_bytes()) {
                *sum += v as u64 * w;
            }
        }
        let avg = sums.map(|s| ((s + total / 2) / total).min(255) as u8);
        Rgb::from_bytes(avg)
    }

    /// Split at the weighted median of `channel`. Both halves are non-empty.
    fn split(mut self, channel: usize) -> (ColorBox, ColorBox) {
        self.entries
            .sort_unstable_by_key(|&(color, _)| (color.channel(channel), color));

        let total = self.total_weight();
        let mut accumulated = 0u64;
        let mut split_idx = 1;
        for (i, (_, w)) in self.entries.iter().enumerate() {
            accumulated += w;
            if accumulated * 2 >= total {
                split_idx = i + 1;
                break;
            }
        }
        split_idx = split_idx.clamp(1, self.entries.len() - 1);

        let upper = self.entries.split_off(split_idx);
        (ColorBox::new(self.entries), ColorBox::new(upper))
    }
}

/// Result of quantizing an RGB plane.
#[derive(Debug, Clone)]
pub struct Quantized {
    /// At most `K` distinct representatives
    pub palette: Palette,
    /// Nearest palette index for every pixel
    pub assignment: PixelAssignment,
}

impl Quantized {
    /// The quantized colors as an RGB plane.
    pub fn to_rgb_plane(&self) -> Result<ChannelPlane, AllocError> {
        self.assignment.render(&self.palette)
    }
}

/// Median-cut quantizer targeting at most `max_colors` colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedianCut {
    max_colors: usize,
}

impl MedianCut {
    /// # Panics
    ///
    /// Panics unless `1 <= max_colors <= 256`.
    pub fn new(max_colors: usize) -> Self {
        assert!(
            (1..=MAX_PALETTE_SIZE).contains(&max_colors),
            "max_colors must be in 1..=256, got {max_colors}"
        );
        Self { max_colors }
    }

    #[inline]
    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    /// Build a palette for `rgb` and assign every pixel to it.
    ///
    /// `alpha`, when given, only weights palette construction; it is not
    /// read or changed otherwise.
    pub fn quantize(
        &self,
        rgb: &ChannelPlane,
        alpha: Option<&ChannelPlane>,
    ) -> Result<Quantized, AllocError> {
        let palette = self.build_palette(rgb, alpha);

        let mut indices = try_alloc(rgb.pixel_count())?;
        let mut cache: HashMap<Rgb, u8> = HashMap::new();
        for color in rgb.colors() {
            let idx = *cache
                .entry(color)
                .or_insert_with(|| palette.nearest(color) as u8);
            indices.push(idx);
        }

        Ok(Quantized {
            assignment: PixelAssignment::new(indices, rgb.width(), rgb.height()),
            palette,
        })
    }

    /// Run median cut and return only the palette.
    pub fn build_palette(&self, rgb: &ChannelPlane, alpha: Option<&ChannelPlane>) -> Palette {
        let mut histogram = weighted_histogram(rgb, alpha);
        if histogram.is_empty() {
            // Nothing visible: fall back to plain counts so every pixel
            // still has a representative.
            tracing::debug!("all pixels transparent, building unweighted palette");
            histogram = weighted_histogram(rgb, None);
        }
        let distinct = histogram.len();

        let mut boxes = vec![ColorBox::new(histogram)];
        while boxes.len() < self.max_colors {
            let mut best: Option<(usize, usize, u8)> = None;
            for (i, b) in boxes.iter().enumerate() {
                if b.entries.len() < 2 {
                    continue;
                }
                let (channel, range) = b.widest_channel();
                match best {
                    Some((_, _, widest)) if range <= widest => {}
                    _ => best = Some((i, channel, range)),
                }
            }

            let Some((idx, channel, _)) = best else {
                break;
            };

            // Lower half keeps the cluster's slot, upper half goes last
            let target = std::mem::replace(&mut boxes[idx], ColorBox::new(Vec::new()));
            let (lower, upper) = target.split(channel);
            boxes[idx] = lower;
            boxes.push(upper);
        }

        let palette = Palette::from_representatives(boxes.iter().map(ColorBox::representative));
        tracing::trace!(
            distinct,
            clusters = boxes.len(),
            colors = palette.len(),
            "median cut finished"
        );
        palette
    }
}

/// Distinct colors with their summed weights, sorted by color.
///
/// Opaque pixels weigh [`OPAQUE_WEIGHT`]; with a non-opaque alpha plane
/// each pixel weighs its alpha and fully transparent pixels are left out.
fn weighted_histogram(rgb: &ChannelPlane, alpha: Option<&ChannelPlane>) -> Vec<(Rgb, u64)> {
    let mut counts: HashMap<Rgb, u64> = HashMap::new();
    match alpha.filter(|a| !a.is_opaque()) {
        Some(alpha) => {
            for (color, &a) in rgb.colors().zip(alpha.samples()) {
                if a > 0 {
                    *counts.entry(color).or_insert(0) += a as u64;
                }
            }
        }
        None => {
            for color in rgb.colors() {
                *counts.entry(color).or_insert(0) += OPAQUE_WEIGHT;
            }
        }
    }

    let mut entries: Vec<(Rgb, u64)> = counts.into_iter().collect();
    entries.sort_unstable_by_key(|&(color, _)| color);
    entries
}
