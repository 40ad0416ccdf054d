//! Ordered, duplicate-free color palette.

use std::collections::HashSet;

use super::error::PaletteError;
use crate::color::Rgb;

/// Largest palette a `u8` assignment can index.
pub const MAX_PALETTE_SIZE: usize = 256;

/// An ordered list of distinct colors.
///
/// Palettes are built fresh for every image; nothing is cached between
/// pipeline runs.
///
/// # Example
///
/// ```
/// use pixel_art::{Palette, Rgb};
///
/// let palette = Palette::new(vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
/// assert_eq!(palette.nearest(Rgb::new(200, 180, 190)), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from a list of colors.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] for an empty list
    /// - [`PaletteError::TooManyColors`] for more than [`MAX_PALETTE_SIZE`] colors
    /// - [`PaletteError::DuplicateColor`] if a color repeats
    pub fn new(colors: Vec<Rgb>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if colors.len() > MAX_PALETTE_SIZE {
            return Err(PaletteError::TooManyColors {
                len: colors.len(),
                max: MAX_PALETTE_SIZE,
            });
        }
        let mut seen = HashSet::with_capacity(colors.len());
        for (index, color) in colors.iter().enumerate() {
            if !seen.insert(*color) {
                return Err(PaletteError::DuplicateColor { index });
            }
        }
        Ok(Self { colors })
    }

    /// Build a palette from candidate representatives, dropping repeats.
    ///
    /// The first occurrence of each color keeps its position.
    pub(crate) fn from_representatives(candidates: impl IntoIterator<Item = Rgb>) -> Self {
        let mut seen = HashSet::new();
        let colors = candidates
            .into_iter()
            .filter(|c| seen.insert(*c))
            .take(MAX_PALETTE_SIZE)
            .collect();
        Self { colors }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn iter(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.colors.iter().copied()
    }

    /// Whether the palette contains `color` exactly.
    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    /// Index of the entry closest to `color` by Euclidean RGB distance.
    ///
    /// Ties go to the lowest index.
    ///
    /// # Panics
    ///
    /// Panics on an empty palette, which [`Palette::new`] never produces.
    pub fn nearest(&self, color: Rgb) -> usize {
        let mut best = 0;
        let mut best_dist = u32::MAX;
        for (i, &entry) in self.colors.iter().enumerate() {
            let dist = color.distance_sq(entry);
            if dist < best_dist {
                best = i;
                best_dist = dist;
                if dist == 0 {
                    break;
                }
            }
        }
        assert!(best_dist != u32::MAX, "nearest() on an empty palette");
        best
    }
}
