//! Color types
//!
//! The pipeline works entirely on 8-bit sRGB samples. [`Rgb`] is the palette
//! and pixel color type; arithmetic that needs more range (enhancement,
//! averaging) widens to `f32` or `u64` locally and narrows back.
//!
//! # Example
//!
//! ```
//! use pixel_art::Rgb;
//!
//! let teal: Rgb = "#008080".parse().unwrap();
//! assert_eq!(teal, Rgb::new(0, 128, 128));
//! assert_eq!(teal.to_string(), "#008080");
//! ```

mod error;
mod rgb;

pub use error::ParseColorError;
pub use rgb::Rgb;
pub(crate) use rgb::{LUMA_B, LUMA_G, LUMA_R};
