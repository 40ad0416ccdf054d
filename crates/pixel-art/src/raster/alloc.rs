//! Fallible buffer allocation.

/// A sample buffer could not be allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("failed to allocate {bytes} bytes")]
pub struct AllocError {
    /// Requested buffer size (`usize::MAX` when the size itself overflowed)
    pub bytes: usize,
}

/// Allocate an empty buffer with room for exactly `len` samples.
///
/// Large images are bounded only by memory, so plane buffers go through
/// `try_reserve_exact` instead of aborting the process on failure.
pub(crate) fn try_alloc(len: usize) -> Result<Vec<u8>, AllocError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| AllocError { bytes: len })?;
    Ok(buf)
}

/// `a * b * c` or an [`AllocError`] carrying `usize::MAX`.
pub(crate) fn checked_len(a: usize, b: usize, c: usize) -> Result<usize, AllocError> {
    a.checked_mul(b)
        .and_then(|n| n.checked_mul(c))
        .ok_or(AllocError { bytes: usize::MAX })
}
