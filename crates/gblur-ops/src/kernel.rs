//! Gaussian kernel construction.
//!
//! # Kernels
//!
//! - [`Kernel::gaussian`] - Normalized 2D Gaussian of side `2r+1`
//! - [`Kernel::identity`] - 1x1 kernel of weight 1 (no-op)
//! - [`Kernel::from_weights`] - Validated custom square kernel
//! - [`SeparableKernel::gaussian`] - 1D taps whose outer product is the
//!   2D Gaussian
//!
//! # Standard deviation
//!
//! `sigma = radius / 2`, except that radius 1 (whose integer half is 0)
//! uses `sigma = 1`. See [`gaussian_sigma`].
//!
//! # Example
//!
//! ```rust
//! use gblur_ops::{build_gaussian_kernel, Radius};
//!
//! let k = build_gaussian_kernel(Radius::new(2).unwrap());
//! assert_eq!(k.side(), 5);
//! assert!((k.sum() - 1.0).abs() < 1e-9);
//! assert_eq!(k.at(-1, 2), k.at(1, -2));
//! ```

use crate::{OpsError, OpsResult, Radius};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Standard deviation used for a given radius.
///
/// `radius / 2` as a float, with `1.0` when the integer half-radius is
/// zero. Only radius 1 takes the fallback.
///
/// ```rust
/// use gblur_ops::{gaussian_sigma, Radius};
///
/// assert_eq!(gaussian_sigma(Radius::new(1).unwrap()), 1.0);
/// assert_eq!(gaussian_sigma(Radius::new(3).unwrap()), 1.5);
/// ```
#[inline]
pub fn gaussian_sigma(radius: Radius) -> f64 {
    if radius.get() / 2 == 0 {
        1.0
    } else {
        radius.get() as f64 / 2.0
    }
}

/// Builds the normalized 2D Gaussian kernel for `radius`.
///
/// Free-function form of [`Kernel::gaussian`].
pub fn build_gaussian_kernel(radius: Radius) -> Kernel {
    Kernel::gaussian(radius)
}

/// Immutable square convolution kernel with odd side length.
///
/// Weights are stored row-major; [`Kernel::at`] addresses them by signed
/// offset from the centre.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    data: Vec<f64>,
    radius: usize,
}

impl Kernel {
    /// Creates the normalized Gaussian kernel for `radius`.
    ///
    /// Each cell is `exp(-(x^2 + y^2) / (2 sigma^2))` divided by the sum of
    /// all cells, so the weights sum to 1.
    pub fn gaussian(radius: Radius) -> Self {
        let r = radius.as_usize() as isize;
        let side = radius.side();
        let sigma = gaussian_sigma(radius);
        let two_sigma2 = 2.0 * sigma * sigma;
        trace!(radius = r, sigma, "Kernel::gaussian");

        let mut data = Vec::with_capacity(side * side);
        let mut sum = 0.0f64;
        for y in -r..=r {
            for x in -r..=r {
                let w = (-((x * x + y * y) as f64) / two_sigma2).exp();
                data.push(w);
                sum += w;
            }
        }

        for w in &mut data {
            *w /= sum;
        }

        Self {
            data,
            radius: radius.as_usize(),
        }
    }

    /// The 1x1 kernel of weight 1.
    ///
    /// Convolving with it copies RGB and forces alpha opaque.
    pub fn identity() -> Self {
        Self {
            data: vec![1.0],
            radius: 0,
        }
    }

    /// Creates a kernel from row-major weights, scaled to sum to 1.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] if `side` is even, `data` is not
    /// `side * side` long, a weight is negative or not finite, or all
    /// weights are zero.
    pub fn from_weights(mut data: Vec<f64>, side: usize) -> OpsResult<Self> {
        if side % 2 == 0 {
            return Err(OpsError::InvalidParameter(format!(
                "kernel side must be odd, got {side}"
            )));
        }
        if side.checked_mul(side) != Some(data.len()) {
            return Err(OpsError::InvalidParameter(format!(
                "kernel data size {} doesn't match {side}x{side}",
                data.len()
            )));
        }
        if let Some(w) = data.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(OpsError::InvalidParameter(format!(
                "kernel weights must be finite and non-negative, got {w}"
            )));
        }
        let sum: f64 = data.iter().sum();
        if !(sum > 0.0 && sum.is_finite()) {
            return Err(OpsError::InvalidParameter(format!(
                "kernel weights must have a positive finite sum, got {sum}"
            )));
        }
        data.iter_mut().for_each(|w| *w /= sum);
        Ok(Self {
            data,
            radius: side / 2,
        })
    }

    /// Half-width of the kernel.
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Side length, `2 * radius + 1`.
    #[inline]
    pub fn side(&self) -> usize {
        2 * self.radius + 1
    }

    /// Row-major weights.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.data
    }

    /// Weight at signed offset `(dx, dy)`, both in `[-radius, radius]`.
    ///
    /// # Panics
    ///
    /// Panics if an offset is outside the kernel.
    #[inline]
    pub fn at(&self, dx: isize, dy: isize) -> f64 {
        let r = self.radius as isize;
        assert!(
            (-r..=r).contains(&dx) && (-r..=r).contains(&dy),
            "kernel offset out of range"
        );
        self.data[(dy + r) as usize * self.side() + (dx + r) as usize]
    }

    /// Weights of the row at vertical offset `dy`.
    #[inline]
    pub fn row(&self, dy: isize) -> &[f64] {
        let side = self.side();
        let start = (dy + self.radius as isize) as usize * side;
        &self.data[start..start + side]
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

/// 1D Gaussian taps for the two-pass separable blur.
///
/// `exp(-(x^2 + y^2) / 2s^2) = exp(-x^2 / 2s^2) * exp(-y^2 / 2s^2)`, and the
/// 2D normalizer is the square of the 1D one, so the outer product of
/// these taps is the 2D kernel up to floating-point rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparableKernel {
    taps: Vec<f64>,
    radius: usize,
}

impl SeparableKernel {
    /// Creates normalized 1D Gaussian taps for `radius`.
    pub fn gaussian(radius: Radius) -> Self {
        let r = radius.as_usize() as isize;
        let sigma = gaussian_sigma(radius);
        let two_sigma2 = 2.0 * sigma * sigma;
        trace!(radius = r, sigma, "SeparableKernel::gaussian");

        let mut taps: Vec<f64> = (-r..=r)
            .map(|x| (-((x * x) as f64) / two_sigma2).exp())
            .collect();
        let sum: f64 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }

        Self {
            taps,
            radius: radius.as_usize(),
        }
    }

    /// Half-width of the taps.
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Normalized taps, index `k` for offset `k - radius`.
    #[inline]
    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    /// Expands to the equivalent 2D kernel (outer product of the taps).
    pub fn to_kernel(&self) -> Kernel {
        let data = self
            .taps
            .iter()
            .flat_map(|wy| self.taps.iter().map(move |wx| wy * wx))
            .collect();
        Kernel {
            data,
            radius: self.radius,
        }
    }
}
