//! # gblur-core
//!
//! Core types for the gblur image blurring workspace.
//!
//! - [`PixelBuffer`] - Row-major RGBA8 image buffer
//! - [`Rgba`] and the [`pixel`] helpers - Pixel type and the saturating
//!   `f64 -> u8` cast used at the buffer-write boundary
//! - [`border`] - Clamp-to-border index mapping
//! - [`Error`] - Buffer construction and access errors
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. Everything else in the
//! workspace builds on it:
//!
//! ```text
//! gblur-core (this crate)
//!    ^
//!    |
//!    +-- gblur-ops (kernel builder, convolution engines)
//!    +-- gblur-io  (PNG/JPEG decode and encode)
//!    +-- gblur-cli (command line front end)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use gblur_core::PixelBuffer;
//!
//! let img = PixelBuffer::filled(4, 3, [10, 20, 30, 255]).unwrap();
//! assert_eq!(img.dimensions(), (4, 3));
//!
//! // Out-of-range coordinates reuse the nearest edge pixel.
//! assert_eq!(img.sample_clamped(-5, 99), [10, 20, 30, 255]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod border;
pub mod error;
pub mod image;
pub mod pixel;

pub use border::clamp_index;
pub use error::{Error, Result};
pub use image::PixelBuffer;
pub use pixel::{to_channel, Rgba, CHANNELS, OPAQUE};

/// Prelude module for convenient imports.
///
/// ```
/// use gblur_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::border::clamp_index;
    pub use crate::error::{Error, Result};
    pub use crate::image::PixelBuffer;
    pub use crate::pixel::{to_channel, Rgba, CHANNELS, OPAQUE};
}
