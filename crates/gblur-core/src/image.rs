//! Row-major RGBA8 pixel buffer.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom, with the four
//! channels interleaved:
//!
//! ```text
//! Memory: [R G B A R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! Width and height are fixed at construction and are always non-zero, so
//! every filter can rely on at least one valid pixel per row and column.
//!
//! # Usage
//!
//! ```rust
//! use gblur_core::PixelBuffer;
//!
//! let mut img = PixelBuffer::new(8, 8).unwrap();
//! img.set_pixel(3, 4, [255, 0, 0, 255]);
//! assert_eq!(img.pixel(3, 4), [255, 0, 0, 255]);
//! assert_eq!(img.pixel(0, 0), [0, 0, 0, 0]);
//! ```

use crate::border::clamp_index;
use crate::pixel::{expand, Rgba, CHANNELS};
use crate::{Error, Result};

/// Owned RGBA8 image.
///
/// Construction validates the layout; once built, a `PixelBuffer` always
/// holds exactly `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a buffer of transparent black pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero or
    /// the byte size overflows.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = byte_len(width, height, CHANNELS)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Creates a buffer with every pixel set to `pixel`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gblur_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::filled(3, 3, [100, 150, 200, 255]).unwrap();
    /// assert!(img.pixels().all(|px| px == [100, 150, 200, 255]));
    /// ```
    pub fn filled(width: u32, height: u32, pixel: Rgba) -> Result<Self> {
        let mut img = Self::new(width, height)?;
        img.fill(pixel);
        Ok(img)
    }

    /// Wraps raw interleaved RGBA bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] for a zero dimension
    /// - [`Error::SizeMismatch`] if `data.len() != width * height * 4`
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height, CHANNELS)?;
        if data.len() != expected {
            return Err(Error::size_mismatch(expected, data.len()));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a buffer from 1, 2, 3 or 4 interleaved channels.
    ///
    /// Grey is replicated into RGB; layouts without alpha become opaque.
    /// This is the entry point for decoders that do not produce RGBA.
    ///
    /// # Errors
    ///
    /// - [`Error::ChannelMismatch`] for a channel count outside `1..=4`
    /// - [`Error::InvalidDimensions`] for a zero dimension
    /// - [`Error::SizeMismatch`] if `data.len() != width * height * channels`
    ///
    /// # Example
    ///
    /// ```rust
    /// use gblur_core::PixelBuffer;
    ///
    /// let rgb = vec![10, 20, 30, 40, 50, 60];
    /// let img = PixelBuffer::from_channels(2, 1, 3, &rgb).unwrap();
    /// assert_eq!(img.pixel(1, 0), [40, 50, 60, 255]);
    /// ```
    pub fn from_channels(width: u32, height: u32, channels: u8, data: &[u8]) -> Result<Self> {
        if channels == 0 || channels as usize > CHANNELS {
            return Err(Error::channel_mismatch(CHANNELS as u8, channels));
        }
        let expected = byte_len(width, height, channels as usize)?;
        if data.len() != expected {
            return Err(Error::size_mismatch(expected, data.len()));
        }
        if channels as usize == CHANNELS {
            return Self::from_raw(width, height, data.to_vec());
        }

        let mut out = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for src in data.chunks_exact(channels as usize) {
            out.extend_from_slice(&expand(src));
        }
        Ok(Self {
            width,
            height,
            data: out,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes per row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA bytes.
    #[inline]
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns its RGBA bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * CHANNELS
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x as usize, y as usize);
        [self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]]
    }

    /// Returns the pixel at (x, y), or [`Error::OutOfBounds`].
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<Rgba> {
        if x < self.width && y < self.height {
            Ok(self.pixel(x, y))
        } else {
            Err(Error::out_of_bounds(x, y, self.width, self.height))
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x as usize, y as usize);
        self.data[o..o + CHANNELS].copy_from_slice(&pixel);
    }

    /// Fills the entire image with a pixel value.
    pub fn fill(&mut self, pixel: Rgba) {
        for chunk in self.data.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Samples with clamp-to-border: coordinates outside the image read the
    /// nearest edge pixel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gblur_core::PixelBuffer;
    ///
    /// let mut img = PixelBuffer::new(2, 2).unwrap();
    /// img.set_pixel(0, 0, [9, 9, 9, 9]);
    /// assert_eq!(img.sample_clamped(-4, -1), [9, 9, 9, 9]);
    /// ```
    #[inline]
    pub fn sample_clamped(&self, x: isize, y: isize) -> Rgba {
        let sx = clamp_index(x, self.width as usize);
        let sy = clamp_index(y, self.height as usize);
        let o = self.offset(sx, sy);
        [self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]]
    }

    /// Returns row `y` as a byte slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.row_stride();
        &self.data[start..start + self.row_stride()]
    }

    /// Iterates over rows as byte slices.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.row_stride())
    }

    /// Iterates over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|c| [c[0], c[1], c[2], c[3]])
    }
}

/// Byte length of a `width x height` buffer with `channels` per pixel.
fn byte_len(width: u32, height: u32, channels: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be > 0",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))
}
