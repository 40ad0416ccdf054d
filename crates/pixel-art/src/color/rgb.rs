//! 8-bit RGB color.

use std::fmt;
use std::str::FromStr;

use super::ParseColorError;

/// Luma weights (ITU-R BT.601), used for saturation and grayscale.
pub(crate) const LUMA_R: f32 = 0.299;
pub(crate) const LUMA_G: f32 = 0.587;
pub(crate) const LUMA_B: f32 = 0.114;

/// A color with three 8-bit channels.
///
/// Ordering is lexicographic over (r, g, b); the quantizer relies on it as a
/// stable tiebreak when sorting colors along a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Opaque white, the default compositing background.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Read the first three samples of a pixel slice.
    ///
    /// # Panics
    ///
    /// Panics if `samples` has fewer than three elements.
    #[inline]
    pub fn from_slice(samples: &[u8]) -> Self {
        Self::new(samples[0], samples[1], samples[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channel value by index (0 = R, 1 = G, 2 = B).
    #[inline]
    pub fn channel(self, index: usize) -> u8 {
        match index {
            0 => self.r,
            1 => self.g,
            _ => self.b,
        }
    }

    /// Luma: `0.299 R + 0.587 G + 0.114 B`, unrounded.
    ///
    /// ```
    /// use pixel_art::Rgb;
    /// assert!((Rgb::new(255, 255, 255).luma() - 255.0).abs() < 1e-3);
    /// ```
    #[inline]
    pub fn luma(self) -> f32 {
        LUMA_R * self.r as f32 + LUMA_G * self.g as f32 + LUMA_B * self.b as f32
    }

    /// Squared Euclidean distance in RGB channel space.
    #[inline]
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (case-insensitive,
    /// surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
