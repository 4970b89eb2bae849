//! Gaussian blur entry points.
//!
//! [`blur`] is the one-call API: it validates the radius, builds the
//! kernel and runs the convolution. [`blur_with`] takes a pre-validated
//! [`Radius`] and [`BlurOptions`] to pick the engine. [`blur_raw`] accepts
//! interleaved bytes straight from a decoder.
//!
//! # Example
//!
//! ```rust
//! use gblur_core::PixelBuffer;
//! use gblur_ops::{blur, blur_with, BlurOptions, Radius, Strategy};
//!
//! let src = PixelBuffer::filled(32, 32, [200, 100, 50, 255]).unwrap();
//!
//! let a = blur(&src, 3).unwrap();
//! let b = blur_with(&src, Radius::new(3).unwrap(), &BlurOptions {
//!     strategy: Strategy::Separable,
//!     ..BlurOptions::default()
//! }).unwrap();
//! assert_eq!(a.dimensions(), b.dimensions());
//!
//! assert!(blur(&src, 0).is_err());
//! ```

use crate::kernel::{Kernel, SeparableKernel};
use crate::{filter, OpsResult, Radius};
use gblur_core::PixelBuffer;
use std::fmt;
use std::str::FromStr;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

/// Convolution engine selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Full 2D kernel per pixel. Reference behaviour.
    #[default]
    Direct,
    /// Two 1D passes. Faster for large radii; equal to `Direct` up to
    /// floating-point rounding (at most 1 per channel).
    Separable,
}

impl Strategy {
    /// Lowercase name used by the CLI and logs.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::Separable => "separable",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = crate::OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "direct" | "2d" => Ok(Strategy::Direct),
            "separable" | "sep" => Ok(Strategy::Separable),
            other => Err(crate::OpsError::InvalidParameter(format!(
                "unknown blur strategy: {other}"
            ))),
        }
    }
}

/// Blur configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurOptions {
    /// Convolution engine.
    pub strategy: Strategy,
    /// Run row-parallel on the Rayon pool. Ignored without the `parallel`
    /// feature.
    pub parallel: bool,
}

impl Default for BlurOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Direct,
            parallel: cfg!(feature = "parallel"),
        }
    }
}

impl BlurOptions {
    /// Single-threaded options for the given strategy.
    pub fn sequential(strategy: Strategy) -> Self {
        Self {
            strategy,
            parallel: false,
        }
    }
}

/// Blurs `image` with a Gaussian of the given radius.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`](crate::OpsError::InvalidParameter) if the
/// radius is not in `1..=Radius::MAX`. Nothing is allocated in that case.
pub fn blur(image: &PixelBuffer, radius: i64) -> OpsResult<PixelBuffer> {
    let radius = Radius::new(radius)?;
    blur_with(image, radius, &BlurOptions::default())
}

/// Blurs `image` with explicit options.
pub fn blur_with(image: &PixelBuffer, radius: Radius, options: &BlurOptions) -> OpsResult<PixelBuffer> {
    debug!(
        width = image.width(),
        height = image.height(),
        %radius,
        strategy = %options.strategy,
        parallel = options.parallel,
        "blur"
    );

    match options.strategy {
        Strategy::Direct => {
            let kernel = Kernel::gaussian(radius);
            run_direct(image, &kernel, options.parallel)
        }
        Strategy::Separable => {
            let kernel = SeparableKernel::gaussian(radius);
            run_separable(image, &kernel, options.parallel)
        }
    }
}

/// Blurs interleaved 8-bit data with 1 to 4 channels.
///
/// The radius is validated before the input is copied into a
/// [`PixelBuffer`].
///
/// # Errors
///
/// - [`OpsError::InvalidParameter`](crate::OpsError::InvalidParameter) for a bad radius
/// - [`OpsError::InvalidInput`](crate::OpsError::InvalidInput) for zero dimensions,
///   an unsupported channel count or a length mismatch
pub fn blur_raw(
    data: &[u8],
    width: u32,
    height: u32,
    channels: u8,
    radius: i64,
) -> OpsResult<PixelBuffer> {
    let radius = Radius::new(radius)?;
    let image = PixelBuffer::from_channels(width, height, channels, data)?;
    blur_with(&image, radius, &BlurOptions::default())
}

fn run_direct(image: &PixelBuffer, kernel: &Kernel, parallel: bool) -> OpsResult<PixelBuffer> {
    #[cfg(feature = "parallel")]
    if parallel {
        return crate::parallel::convolve(image, kernel);
    }
    #[cfg(not(feature = "parallel"))]
    if parallel {
        debug!("parallel requested but the `parallel` feature is disabled");
    }
    filter::convolve(image, kernel)
}

fn run_separable(image: &PixelBuffer, kernel: &SeparableKernel, parallel: bool) -> OpsResult<PixelBuffer> {
    #[cfg(feature = "parallel")]
    if parallel {
        return crate::parallel::convolve_separable(image, kernel);
    }
    #[cfg(not(feature = "parallel"))]
    if parallel {
        debug!("parallel requested but the `parallel` feature is disabled");
    }
    filter::convolve_separable(image, kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpsError;

    #[test]
    fn test_blur_rejects_bad_radius() {
        let img = PixelBuffer::filled(4, 4, [1, 2, 3, 4]).unwrap();
        for r in [0, -1, Radius::MAX as i64 + 1] {
            assert!(matches!(blur(&img, r), Err(OpsError::InvalidParameter(_))));
        }
    }

    #[test]
    fn test_blur_uniform_3x3() {
        let img = PixelBuffer::filled(3, 3, [100, 150, 200, 255]).unwrap();
        let out = blur(&img, 1).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_strategies_agree() {
        let mut img = PixelBuffer::filled(12, 9, [0, 0, 0, 255]).unwrap();
        img.set_pixel(0, 0, [255, 255, 255, 255]);
        img.set_pixel(7, 4, [10, 200, 90, 255]);
        let radius = Radius::new(3).unwrap();

        let direct = blur_with(&img, radius, &BlurOptions::sequential(Strategy::Direct)).unwrap();
        for opts in [
            BlurOptions::default(),
            BlurOptions::sequential(Strategy::Separable),
            BlurOptions { strategy: Strategy::Separable, parallel: true },
        ] {
            let out = blur_with(&img, radius, &opts).unwrap();
            for (a, b) in direct.as_raw().iter().zip(out.as_raw()) {
                assert!(a.abs_diff(*b) <= 1, "{opts:?}");
            }
        }
    }

    #[test]
    fn test_blur_raw_rgb() {
        let rgb = vec![100u8, 150, 200].repeat(9);
        let out = blur_raw(&rgb, 3, 3, 3, 1).unwrap();
        assert!(out.pixels().all(|px| px == [100, 150, 200, 255]));
    }

    #[test]
    fn test_blur_raw_malformed_input() {
        assert!(matches!(
            blur_raw(&[0; 12], 0, 3, 4, 1),
            Err(OpsError::InvalidInput(_))
        ));
        assert!(matches!(
            blur_raw(&[0; 10], 2, 2, 3, 1),
            Err(OpsError::InvalidInput(_))
        ));
        assert!(matches!(
            blur_raw(&[0; 20], 2, 2, 5, 1),
            Err(OpsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_blur_raw_checks_radius_first() {
        // malformed input and bad radius: the radius is reported
        assert!(matches!(
            blur_raw(&[0; 3], 0, 0, 9, 0),
            Err(OpsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("direct".parse::<Strategy>().unwrap(), Strategy::Direct);
        assert_eq!("Separable".parse::<Strategy>().unwrap(), Strategy::Separable);
        assert!("box".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Separable.to_string(), "separable");
    }
}
