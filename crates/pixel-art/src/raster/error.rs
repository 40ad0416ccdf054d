//! Image shape errors.

/// The image handed to the pipeline does not have a supported shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    /// Width or height is zero
    #[error("image has zero dimension: {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    /// Channel count other than 3 (RGB) or 4 (RGBA)
    #[error("unsupported channel count: {0} (expected 3 or 4)")]
    UnsupportedChannels(usize),

    /// Sample buffer length does not equal width * height * channels
    #[error("sample buffer has {actual} bytes, expected {expected}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// width * height * channels does not fit in memory addressing
    #[error("image dimensions {width}x{height} overflow addressable memory")]
    DimensionsOverflow { width: u32, height: u32 },
}
