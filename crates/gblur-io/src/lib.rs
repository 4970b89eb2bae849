//! # gblur-io
//!
//! Image decode/encode adapters for gblur.
//!
//! Decoders hand back a [`PixelBuffer`] (always RGBA8), encoders take one.
//! Nothing here touches the blur itself; failures are surfaced as
//! [`IoError`] without recovery.
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | yes  | yes   | `png`   |
//! | JPEG   | yes  | yes   | `jpeg`  |
//!
//! # Example
//!
//! ```rust,ignore
//! use gblur_io::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.jpg", &image)?;
//! ```

#![warn(missing_docs)]

mod detect;
mod error;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;

pub use detect::Format;
pub use error::{IoError, IoResult};

use gblur_core::PixelBuffer;
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Reads an image, detecting the format from magic bytes then extension.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    trace!(path = %path.display(), ?format, "read");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        _ => Err(unsupported(path)),
    }
}

/// Writes an image, choosing the format from the file extension.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    trace!(path = %path.display(), ?format, "write");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image),

        _ => Err(unsupported(path)),
    }
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}
