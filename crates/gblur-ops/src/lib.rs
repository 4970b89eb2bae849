//! # gblur-ops
//!
//! Gaussian blur for RGBA8 images.
//!
//! Two components run in sequence: the kernel builder turns a radius into a
//! normalized Gaussian weight matrix, and a convolution engine applies it to
//! every pixel with clamp-to-border sampling. Both are pure: no I/O, no
//! shared state, deterministic output.
//!
//! # Modules
//!
//! - [`radius`] - Validated [`Radius`] newtype
//! - [`kernel`] - [`Kernel`] and [`SeparableKernel`] construction
//! - [`filter`] - Sequential direct and separable convolution
//! - [`parallel`] - Row-parallel variants (feature `parallel`)
//! - [`blur`](mod@blur) - [`blur`], [`blur_with`], [`blur_raw`] entry points
//!
//! # Example
//!
//! ```rust
//! use gblur_core::PixelBuffer;
//! use gblur_ops::{build_gaussian_kernel, filter::convolve, Radius};
//!
//! let image = PixelBuffer::filled(3, 3, [100, 150, 200, 255]).unwrap();
//! let kernel = build_gaussian_kernel(Radius::new(1).unwrap());
//! let blurred = convolve(&image, &kernel).unwrap();
//! assert_eq!(blurred, image);
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - Rayon row-parallel engines

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod blur;
pub mod filter;
pub mod kernel;
pub mod radius;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use blur::{blur, blur_raw, blur_with, BlurOptions, Strategy};
pub use error::{OpsError, OpsResult};
pub use filter::convolve;
pub use kernel::{build_gaussian_kernel, gaussian_sigma, Kernel, SeparableKernel};
pub use radius::Radius;
