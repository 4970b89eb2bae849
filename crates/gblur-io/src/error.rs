//! Error types for I/O operations.
//!
//! Decode and encode failures are reported opaquely: the codec's message is
//! kept as a string and no recovery is attempted.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported or unrecognized format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Unsupported colour type / bit depth combination.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Decoded data cannot form a pixel buffer.
    #[error("invalid image: {0}")]
    Image(#[from] gblur_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
