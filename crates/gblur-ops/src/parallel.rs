//! Parallel convolution using Rayon.
//!
//! The output is partitioned by row; each worker owns its rows exclusively
//! and reads the shared source immutably. Per-pixel arithmetic is the same
//! code as in [`crate::filter`], so results are bit-identical to the
//! sequential engines.
//!
//! # Example
//!
//! ```rust
//! use gblur_core::PixelBuffer;
//! use gblur_ops::{parallel, Kernel, Radius};
//!
//! let src = PixelBuffer::filled(256, 256, [10, 20, 30, 255]).unwrap();
//! let kernel = Kernel::gaussian(Radius::new(3).unwrap());
//! let blurred = parallel::convolve(&src, &kernel).unwrap();
//! assert_eq!(blurred.dimensions(), (256, 256));
//! ```

use crate::filter::{convolve_row, horizontal_row, vertical_row};
use crate::{Kernel, OpsResult, SeparableKernel};
use gblur_core::PixelBuffer;
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Parallel direct convolution. See [`crate::filter::convolve`].
pub fn convolve(src: &PixelBuffer, kernel: &Kernel) -> OpsResult<PixelBuffer> {
    trace!(
        width = src.width(),
        height = src.height(),
        side = kernel.side(),
        threads = rayon::current_num_threads(),
        "parallel::convolve"
    );

    let mut dst = PixelBuffer::new(src.width(), src.height())?;
    let stride = dst.row_stride();
    dst.as_raw_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| convolve_row(src, kernel, y, row));
    Ok(dst)
}

/// Parallel separable convolution. See [`crate::filter::convolve_separable`].
pub fn convolve_separable(src: &PixelBuffer, kernel: &SeparableKernel) -> OpsResult<PixelBuffer> {
    trace!(
        width = src.width(),
        height = src.height(),
        radius = kernel.radius(),
        threads = rayon::current_num_threads(),
        "parallel::convolve_separable"
    );

    let width = src.width() as usize;
    let height = src.height() as usize;

    let mut tmp = vec![[0.0f64; 3]; src.pixel_count()];
    tmp.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| horizontal_row(src, kernel, y, row));

    let mut dst = PixelBuffer::new(src.width(), src.height())?;
    let stride = dst.row_stride();
    let tmp = &tmp;
    dst.as_raw_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| vertical_row(tmp, width, height, kernel, y, row));
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filter, Radius};

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut img = PixelBuffer::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                img.set_pixel(x, y, [(x * 7) as u8, (y * 11) as u8, ((x ^ y) * 5) as u8, 90]);
            }
        }
        img
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let src = gradient(37, 23);
        for r in [1, 2, 4] {
            let radius = Radius::new(r).unwrap();
            let k = Kernel::gaussian(radius);
            assert_eq!(
                convolve(&src, &k).unwrap(),
                filter::convolve(&src, &k).unwrap()
            );
        }
    }

    #[test]
    fn test_parallel_separable_matches_sequential() {
        let src = gradient(29, 31);
        for r in [1, 3, 5] {
            let k = SeparableKernel::gaussian(Radius::new(r).unwrap());
            assert_eq!(
                convolve_separable(&src, &k).unwrap(),
                filter::convolve_separable(&src, &k).unwrap()
            );
        }
    }

    #[test]
    fn test_parallel_uniform() {
        let src = PixelBuffer::filled(64, 64, [100, 150, 200, 0]).unwrap();
        let k = Kernel::gaussian(Radius::new(2).unwrap());
        let out = convolve(&src, &k).unwrap();
        assert!(out.pixels().all(|px| px == [100, 150, 200, 255]));
    }
}
