//! Block pixelation by two-stage nearest-neighbor resampling.
//!
//! A plane of `W x H` is first reduced to `ceil(W/B) x ceil(H/B)` by taking
//! the sample at the top-left corner of each `B x B` block, then blown back
//! up to `W x H` by repeating every reduced sample over its block. Blocks on
//! the right and bottom edges are clipped to the image.
//!
//! No averaging or interpolation happens anywhere, so every output value
//! already existed in the input. This is what keeps alpha edges crisp, and
//! since the RGB and alpha planes go through the same block grid their edges
//! stay aligned.

mod pixelator;

pub use pixelator::Pixelator;
