//! Alpha handling: splitting an image into planes and putting it back together.
//!
//! - [`extract_alpha`] separates the RGB samples from the alpha samples so
//!   color stages never see transparency.
//! - [`Compositor`] either re-interleaves the planes verbatim or flattens the
//!   image against a solid background, dropping the alpha channel:
//!   `out = floor(fg * a/255 + bg * (1 - a/255))`.

mod composite;
mod extract;

pub use composite::{blend, Compositor};
pub use extract::{extract_alpha, ExtractedPlanes};
