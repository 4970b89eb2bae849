//! Convolution engines.
//!
//! Both engines sample with clamp-to-border, accumulate red, green and blue
//! in `f64`, narrow through [`to_channel`] and write alpha as
//! [`OPAQUE`]. The source buffer is only read; the result is a new buffer
//! of the same size.
//!
//! - [`convolve`] - Direct 2D convolution, `O(w * h * side^2)`
//! - [`convolve_separable`] - Horizontal then vertical 1D pass,
//!   `O(w * h * side)`. Same result up to floating-point rounding, which
//!   can move a channel by at most 1 after rounding to 8 bits.
//!
//! # Example
//!
//! ```rust
//! use gblur_core::PixelBuffer;
//! use gblur_ops::filter::convolve;
//! use gblur_ops::{Kernel, Radius};
//!
//! let src = PixelBuffer::filled(16, 16, [100, 150, 200, 80]).unwrap();
//! let kernel = Kernel::gaussian(Radius::new(2).unwrap());
//! let blurred = convolve(&src, &kernel).unwrap();
//! assert_eq!(blurred.pixel(0, 0), [100, 150, 200, 255]);
//! ```

use crate::{Kernel, OpsResult, SeparableKernel};
use gblur_core::border::clamped_window;
use gblur_core::{to_channel, PixelBuffer, CHANNELS, OPAQUE};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Intermediate RGB row value of the separable engine.
pub(crate) type Rgb64 = [f64; 3];

/// Applies `kernel` to every pixel of `src`.
///
/// For output pixel `(x, y)` the RGB result is the sum over offsets
/// `(i, j)` of `src[clamp(x+i), clamp(y+j)] * kernel[j][i]`. Alpha is
/// forced to 255.
///
/// # Errors
///
/// Propagates allocation-size errors of the output buffer as
/// [`OpsError::InvalidInput`](crate::OpsError::InvalidInput).
pub fn convolve(src: &PixelBuffer, kernel: &Kernel) -> OpsResult<PixelBuffer> {
    trace!(
        width = src.width(),
        height = src.height(),
        side = kernel.side(),
        "convolve"
    );

    let mut dst = PixelBuffer::new(src.width(), src.height())?;
    let stride = dst.row_stride();
    for (y, row) in dst.as_raw_mut().chunks_exact_mut(stride).enumerate() {
        convolve_row(src, kernel, y, row);
    }
    Ok(dst)
}

/// Two-pass separable Gaussian convolution.
///
/// The horizontal pass keeps full `f64` precision; only the vertical pass
/// narrows to 8 bits.
pub fn convolve_separable(src: &PixelBuffer, kernel: &SeparableKernel) -> OpsResult<PixelBuffer> {
    trace!(
        width = src.width(),
        height = src.height(),
        radius = kernel.radius(),
        "convolve_separable"
    );

    let width = src.width() as usize;
    let mut tmp = vec![[0.0f64; 3]; src.pixel_count()];
    for (y, row) in tmp.chunks_exact_mut(width).enumerate() {
        horizontal_row(src, kernel, y, row);
    }

    let mut dst = PixelBuffer::new(src.width(), src.height())?;
    let stride = dst.row_stride();
    for (y, row) in dst.as_raw_mut().chunks_exact_mut(stride).enumerate() {
        vertical_row(&tmp, src.width() as usize, src.height() as usize, kernel, y, row);
    }
    Ok(dst)
}

/// Computes output row `y` of the direct convolution into `out`.
///
/// Reads `src` only, so rows can be produced independently.
pub(crate) fn convolve_row(src: &PixelBuffer, kernel: &Kernel, y: usize, out: &mut [u8]) {
    let width = src.width() as usize;
    let height = src.height() as usize;
    let side = kernel.side();
    let r = kernel.radius();
    let data = src.as_raw();
    let stride = src.row_stride();

    let row_starts: Vec<usize> = clamped_window(y, r, height).map(|sy| sy * stride).collect();
    let mut cols: Vec<usize> = Vec::with_capacity(side);

    for (x, dst) in out.chunks_exact_mut(CHANNELS).enumerate() {
        cols.clear();
        cols.extend(clamped_window(x, r, width).map(|sx| sx * CHANNELS));

        let mut acc = [0.0f64; 3];
        for (start, weights) in row_starts.iter().zip(kernel.weights().chunks_exact(side)) {
            for (col, &w) in cols.iter().zip(weights) {
                let o = start + col;
                acc[0] += data[o] as f64 * w;
                acc[1] += data[o + 1] as f64 * w;
                acc[2] += data[o + 2] as f64 * w;
            }
        }

        write_pixel(dst, acc);
    }
}

/// Horizontal pass of the separable engine for row `y`.
pub(crate) fn horizontal_row(src: &PixelBuffer, kernel: &SeparableKernel, y: usize, out: &mut [Rgb64]) {
    let width = src.width() as usize;
    let r = kernel.radius();
    let row = src.row(y as u32);

    for (x, dst) in out.iter_mut().enumerate() {
        let mut acc = [0.0f64; 3];
        for (sx, &w) in clamped_window(x, r, width).zip(kernel.taps()) {
            let o = sx * CHANNELS;
            acc[0] += row[o] as f64 * w;
            acc[1] += row[o + 1] as f64 * w;
            acc[2] += row[o + 2] as f64 * w;
        }
        *dst = acc;
    }
}

/// Vertical pass of the separable engine for output row `y`.
pub(crate) fn vertical_row(
    tmp: &[Rgb64],
    width: usize,
    height: usize,
    kernel: &SeparableKernel,
    y: usize,
    out: &mut [u8],
) {
    let r = kernel.radius();
    let row_starts: Vec<usize> = clamped_window(y, r, height).map(|sy| sy * width).collect();

    for (x, dst) in out.chunks_exact_mut(CHANNELS).enumerate() {
        let mut acc = [0.0f64; 3];
        for (start, &w) in row_starts.iter().zip(kernel.taps()) {
            let px = tmp[start + x];
            acc[0] += px[0] * w;
            acc[1] += px[1] * w;
            acc[2] += px[2] * w;
        }
        write_pixel(dst, acc);
    }
}

#[inline]
fn write_pixel(dst: &mut [u8], acc: Rgb64) {
    dst[0] = to_channel(acc[0]);
    dst[1] = to_channel(acc[1]);
    dst[2] = to_channel(acc[2]);
    dst[3] = OPAQUE;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Radius;

    fn gaussian(r: i64) -> Kernel {
        Kernel::gaussian(Radius::new(r).unwrap())
    }

    fn separable(r: i64) -> SeparableKernel {
        SeparableKernel::gaussian(Radius::new(r).unwrap())
    }

    /// Deterministic pseudo-random RGBA test pattern.
    fn noise(width: u32, height: u32, seed: u32) -> PixelBuffer {
        let mut state = seed.wrapping_mul(2_654_435_761).max(1);
        let data = (0..width * height * 4)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect();
        PixelBuffer::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn test_uniform_invariant_under_custom_kernel() {
        let src = PixelBuffer::filled(3, 3, [100, 150, 200, 255]).unwrap();
        let box3 = Kernel::from_weights(vec![1.0; 9], 3).unwrap();
        let out = convolve(&src, &box3).unwrap();
        assert!(out.pixels().all(|px| px == [100, 150, 200, 255]));
    }

    #[test]
    fn test_uniform_3x3_radius_1() {
        let src = PixelBuffer::filled(3, 3, [100, 150, 200, 255]).unwrap();
        let out = convolve(&src, &gaussian(1)).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_uniform_invariant_any_radius() {
        for (r, color) in [(1, [0, 0, 0, 0]), (2, [255, 255, 255, 10]), (5, [17, 99, 240, 128]), (9, [1, 2, 3, 4])] {
            let src = PixelBuffer::filled(7, 5, color).unwrap();
            let out = convolve(&src, &gaussian(r)).unwrap();
            for px in out.pixels() {
                assert_eq!(px, [color[0], color[1], color[2], 255], "radius {r}");
            }
        }
    }

    #[test]
    fn test_dimensions_preserved() {
        for (w, h) in [(1, 1), (1, 9), (13, 1), (8, 5)] {
            let src = noise(w, h, w * 31 + h);
            let out = convolve(&src, &gaussian(3)).unwrap();
            assert_eq!(out.dimensions(), (w, h));
        }
    }

    #[test]
    fn test_alpha_forced_opaque_and_source_untouched() {
        let src = noise(6, 6, 7);
        let before = src.clone();
        let out = convolve(&src, &gaussian(2)).unwrap();
        assert_eq!(src, before);
        assert!(out.pixels().all(|px| px[3] == 255));
    }

    #[test]
    fn test_identity_kernel() {
        let src = noise(9, 4, 3);
        let out = convolve(&src, &Kernel::identity()).unwrap();
        for (a, b) in src.pixels().zip(out.pixels()) {
            assert_eq!([a[0], a[1], a[2], 255], b);
        }
    }

    #[test]
    fn test_corner_uses_clamped_samples() {
        // White at (0,0) on black. With clamp-to-border the corner pixel
        // gathers centre + 2 edges + 1 corner weight (255 * 0.52698 = 134.38);
        // zero padding would give only the centre (52).
        let mut src = PixelBuffer::filled(3, 3, [0, 0, 0, 255]).unwrap();
        src.set_pixel(0, 0, [255, 255, 255, 255]);
        let out = convolve(&src, &gaussian(1)).unwrap();

        let red: Vec<u8> = out.pixels().map(|px| px[0]).collect();
        assert_eq!(red, vec![134, 51, 0, 51, 19, 0, 0, 0, 0]);
        assert_eq!(out.pixel(0, 0), [134, 134, 134, 255]);
    }

    #[test]
    fn test_point_source_falls_off_with_distance() {
        let mut src = PixelBuffer::filled(11, 11, [0, 0, 0, 255]).unwrap();
        src.set_pixel(5, 5, [255, 255, 255, 255]);
        let out = convolve(&src, &gaussian(2)).unwrap();

        let row: Vec<u8> = (0..11).map(|x| out.pixel(x, 5)[0]).collect();
        assert_eq!(row, vec![0, 0, 0, 6, 25, 41, 25, 6, 0, 0, 0]);

        // strictly decreasing inside the kernel support, along both axes and diagonals
        for d in 1..=2u32 {
            assert!(out.pixel(5 + d, 5)[0] < out.pixel(5 + d - 1, 5)[0]);
            assert!(out.pixel(5, 5 - d)[0] < out.pixel(5, 5 - d + 1)[0]);
            assert!(out.pixel(5 + d, 5 + d)[0] < out.pixel(5 + d - 1, 5 + d - 1)[0]);
        }
        assert_eq!(out.pixel(8, 5)[0], 0);
    }

    #[test]
    fn test_single_pixel_image() {
        let src = PixelBuffer::filled(1, 1, [12, 34, 56, 0]).unwrap();
        let out = convolve(&src, &gaussian(4)).unwrap();
        assert_eq!(out.pixel(0, 0), [12, 34, 56, 255]);
    }

    #[test]
    fn test_separable_close_to_direct() {
        for r in [1, 2, 3, 6] {
            let src = noise(17, 11, r as u32);
            let direct = convolve(&src, &gaussian(r)).unwrap();
            let sep = convolve_separable(&src, &separable(r)).unwrap();
            assert_eq!(sep.dimensions(), direct.dimensions());
            for (a, b) in direct.as_raw().iter().zip(sep.as_raw()) {
                assert!(a.abs_diff(*b) <= 1, "radius {r}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_separable_corner_case() {
        let mut src = PixelBuffer::filled(3, 3, [0, 0, 0, 255]).unwrap();
        src.set_pixel(0, 0, [255, 255, 255, 255]);
        let out = convolve_separable(&src, &separable(1)).unwrap();
        let red: Vec<u8> = out.pixels().map(|px| px[0]).collect();
        assert_eq!(red, vec![134, 51, 0, 51, 19, 0, 0, 0, 0]);
    }

    #[test]
    fn test_repeated_blur_keeps_changing() {
        let mut src = PixelBuffer::filled(9, 9, [0, 0, 0, 255]).unwrap();
        src.set_pixel(4, 4, [255, 255, 255, 255]);
        let k = gaussian(1);
        let once = convolve(&src, &k).unwrap();
        let twice = convolve(&once, &k).unwrap();
        assert_ne!(once, twice);
    }
}
