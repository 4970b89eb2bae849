//! Error types for gblur-core operations.
//!
//! Every way a [`PixelBuffer`](crate::PixelBuffer) can be malformed is
//! reported here, at construction time, so that the convolution engines
//! never see an inconsistent buffer.
//!
//! # Usage
//!
//! ```rust
//! use gblur_core::{Error, PixelBuffer};
//!
//! let err = PixelBuffer::from_raw(0, 10, Vec::new()).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```
//!
//! # Used By
//!
//! - [`crate::image::PixelBuffer`] - Construction and bounds checking
//! - `gblur-ops` - Wrapped as `OpsError::InvalidInput`
//! - `gblur-io` - Wrapped when a decoded image cannot form a buffer

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or addressing a pixel buffer.
///
/// # Categories
///
/// - **Dimension errors**: [`InvalidDimensions`](Error::InvalidDimensions)
/// - **Layout errors**: [`ChannelMismatch`](Error::ChannelMismatch), [`SizeMismatch`](Error::SizeMismatch)
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds)
#[derive(Debug, Error)]
pub enum Error {
    /// Width or height is zero, or the byte size overflows `usize`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Interleaved channel count is not one of the supported layouts.
    ///
    /// Supported layouts are 1 (grey), 2 (grey + alpha), 3 (RGB) and
    /// 4 (RGBA) channels.
    #[error("unsupported channel count {got} (expected 1 to {max})")]
    ChannelMismatch {
        /// Largest supported channel count
        max: u8,
        /// Channel count that was supplied
        got: u8,
    },

    /// Raw data length does not match `width * height * channels`.
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },

    /// Pixel coordinates are outside image bounds.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(max: u8, got: u8) -> Self {
        Self::ChannelMismatch { max, got }
    }

    /// Creates an [`Error::SizeMismatch`] error.
    #[inline]
    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::SizeMismatch { expected, actual }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns `true` if the error describes a malformed buffer layout.
    #[inline]
    pub fn is_layout_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::ChannelMismatch { .. } | Self::SizeMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds() {
        let err = Error::out_of_bounds(100, 50, 80, 60);
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
        assert!(msg.contains("80x60"));
        assert!(err.is_bounds_error());
        assert!(!err.is_layout_error());
    }

    #[test]
    fn test_size_mismatch() {
        let err = Error::size_mismatch(36, 35);
        assert_eq!(err.to_string(), "size mismatch: expected 36 bytes, got 35");
        assert!(err.is_layout_error());
    }

    #[test]
    fn test_channel_mismatch() {
        let err = Error::channel_mismatch(4, 7);
        assert!(err.to_string().contains('7'));
        assert!(err.is_layout_error());
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(0, 12, "width must be > 0");
        let msg = err.to_string();
        assert!(msg.contains("0x12"));
        assert!(msg.contains("width must be > 0"));
    }
}
