//! Pixel type and channel conversions.
//!
//! A pixel is four 8-bit channels in `[R, G, B, A]` order. Filters
//! accumulate in `f64` and come back to 8 bits through [`to_channel`],
//! the single place where a weighted sum is narrowed to channel storage.

/// Number of interleaved channels per pixel in a [`PixelBuffer`](crate::PixelBuffer).
pub const CHANNELS: usize = 4;

/// Fully opaque alpha value.
pub const OPAQUE: u8 = 255;

/// One RGBA8 pixel: `[R, G, B, A]`.
pub type Rgba = [u8; CHANNELS];

/// Narrows an accumulated channel value to 8-bit storage.
///
/// Rounds to nearest with ties to even, then saturates to `[0, 255]`.
/// NaN maps to 0. A normalized kernel applied to in-range channels never
/// leaves the range; saturation only absorbs floating-point overshoot.
///
/// # Example
///
/// ```rust
/// use gblur_core::to_channel;
///
/// assert_eq!(to_channel(99.9999999), 100);
/// assert_eq!(to_channel(134.379), 134);
/// assert_eq!(to_channel(2.5), 2);
/// assert_eq!(to_channel(-3.0), 0);
/// assert_eq!(to_channel(300.0), 255);
/// ```
#[inline]
pub fn to_channel(v: f64) -> u8 {
    // ties to even like clamped byte storage; `as` saturates and maps NaN to 0
    v.round_ties_even() as u8
}

/// Returns the pixel with its alpha replaced by [`OPAQUE`].
#[inline]
pub fn opaque(px: Rgba) -> Rgba {
    [px[0], px[1], px[2], OPAQUE]
}

/// Expands an interleaved pixel of 1 to 4 channels into RGBA.
///
/// Grey is replicated into R, G and B. Missing alpha becomes [`OPAQUE`].
/// Callers guarantee `1 <= src.len() <= 4`.
#[inline]
pub(crate) fn expand(src: &[u8]) -> Rgba {
    match *src {
        [g] => [g, g, g, OPAQUE],
        [g, a] => [g, g, g, a],
        [r, g, b] => [r, g, b, OPAQUE],
        [r, g, b, a] => [r, g, b, a],
        _ => unreachable!("channel count validated by caller"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_channel_rounds() {
        assert_eq!(to_channel(0.49), 0);
        assert_eq!(to_channel(0.51), 1);
        assert_eq!(to_channel(19.153), 19);
        assert_eq!(to_channel(50.73), 51);
        assert_eq!(to_channel(254.6), 255);
    }

    #[test]
    fn test_to_channel_ties_to_even() {
        assert_eq!(to_channel(0.5), 0);
        assert_eq!(to_channel(1.5), 2);
        assert_eq!(to_channel(2.5), 2);
        assert_eq!(to_channel(127.5), 128);
        assert_eq!(to_channel(254.5), 254);
    }

    #[test]
    fn test_to_channel_saturates() {
        assert_eq!(to_channel(-0.4), 0);
        assert_eq!(to_channel(-1000.0), 0);
        assert_eq!(to_channel(255.4), 255);
        assert_eq!(to_channel(1e12), 255);
        assert_eq!(to_channel(f64::NAN), 0);
        assert_eq!(to_channel(f64::INFINITY), 255);
    }

    #[test]
    fn test_opaque() {
        assert_eq!(opaque([1, 2, 3, 0]), [1, 2, 3, 255]);
    }

    #[test]
    fn test_expand_layouts() {
        assert_eq!(expand(&[7]), [7, 7, 7, 255]);
        assert_eq!(expand(&[7, 9]), [7, 7, 7, 9]);
        assert_eq!(expand(&[1, 2, 3]), [1, 2, 3, 255]);
        assert_eq!(expand(&[1, 2, 3, 4]), [1, 2, 3, 4]);
    }
}
