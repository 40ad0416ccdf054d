//! Palette validation errors.

/// Returned by [`Palette::new`](super::Palette::new) for color lists that
/// break the palette invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,

    /// Duplicate color found at the specified index
    #[error("duplicate color found at index {index}")]
    DuplicateColor {
        /// Index where the duplicate was found
        index: usize,
    },

    /// More colors than a `u8` index can address
    #[error("palette has {len} colors, at most {max} allowed")]
    TooManyColors { len: usize, max: usize },
}
