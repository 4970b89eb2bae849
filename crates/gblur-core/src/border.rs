//! Clamp-to-border index mapping.
//!
//! Neighbourhood filters sample outside the image near its edges. Every
//! filter in the workspace resolves those samples the same way: the
//! out-of-range coordinate is replaced by the nearest valid one, so edge
//! pixels are repeated rather than padded with black or wrapped around.

/// Maps a possibly out-of-range coordinate into `[0, len - 1]`.
///
/// `len` must be non-zero; a [`PixelBuffer`](crate::PixelBuffer) never has a
/// zero dimension.
///
/// # Example
///
/// ```rust
/// use gblur_core::clamp_index;
///
/// assert_eq!(clamp_index(-3, 5), 0);
/// assert_eq!(clamp_index(2, 5), 2);
/// assert_eq!(clamp_index(9, 5), 4);
/// ```
#[inline]
pub fn clamp_index(i: isize, len: usize) -> usize {
    debug_assert!(len > 0, "clamp_index on empty axis");
    if i <= 0 {
        0
    } else {
        (i as usize).min(len - 1)
    }
}

/// Precomputes clamped source indices for `pos + offset` for every offset
/// in `[-radius, radius]`.
///
/// Index `k` of the result is the source coordinate for offset
/// `k - radius`. Filters use this to hoist the clamp out of their inner
/// loops.
pub fn clamped_window(pos: usize, radius: usize, len: usize) -> impl Iterator<Item = usize> {
    let pos = pos as isize;
    let r = radius as isize;
    (-r..=r).map(move |d| clamp_index(pos + d, len))
}
