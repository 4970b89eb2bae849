//! JPEG format support.
//!
//! JPEG has no alpha channel: decoded images are opaque RGBA, and alpha is
//! dropped on write. Blurred output is always opaque, so nothing is lost
//! for this workspace's use.
//!
//! Grey and CMYK inputs are converted to RGB on read.

use crate::{IoError, IoResult};
use gblur_core::{PixelBuffer, CHANNELS};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Default encoder quality.
pub const DEFAULT_QUALITY: u8 = 90;

/// Reads a JPEG file into an opaque RGBA buffer.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    trace!(path = %path.as_ref().display(), "jpeg::read");
    let file = File::open(path.as_ref())?;
    decode(file)
}

/// Decodes a JPEG stream.
pub fn decode<R: Read>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(reader));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    debug!(width, height, format = ?info.pixel_format, "decoded JPEG");

    match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => Ok(PixelBuffer::from_channels(width, height, 3, &pixels)?),
        jpeg_decoder::PixelFormat::L8 => Ok(PixelBuffer::from_channels(width, height, 1, &pixels)?),
        jpeg_decoder::PixelFormat::L16 => {
            // big-endian samples, keep the high byte
            let grey: Vec<u8> = pixels.chunks_exact(2).map(|l16| l16[0]).collect();
            Ok(PixelBuffer::from_channels(width, height, 1, &grey)?)
        }
        jpeg_decoder::PixelFormat::CMYK32 => {
            let rgb: Vec<u8> = pixels
                .chunks_exact(4)
                .flat_map(|cmyk| {
                    let k = 1.0 - cmyk[3] as f32 / 255.0;
                    let ch = |v: u8| ((1.0 - v as f32 / 255.0) * k * 255.0).round() as u8;
                    [ch(cmyk[0]), ch(cmyk[1]), ch(cmyk[2])]
                })
                .collect();
            Ok(PixelBuffer::from_channels(width, height, 3, &rgb)?)
        }
    }
}

/// Writes a buffer as JPEG with [`DEFAULT_QUALITY`].
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    write_with_quality(path, image, DEFAULT_QUALITY)
}

/// Writes a buffer as JPEG with the given quality (1-100).
pub fn write_with_quality<P: AsRef<Path>>(path: P, image: &PixelBuffer, quality: u8) -> IoResult<()> {
    trace!(path = %path.as_ref().display(), quality, "jpeg::write");
    let bytes = encode(image, quality)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Encodes a buffer as JPEG bytes, dropping alpha.
pub fn encode(image: &PixelBuffer, quality: u8) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    let too_large = |v: u32| {
        IoError::EncodeError(format!("dimension {v} exceeds JPEG limit of {}", u16::MAX))
    };
    let width = u16::try_from(image.width()).map_err(|_| too_large(image.width()))?;
    let height = u16::try_from(image.height()).map_err(|_| too_large(image.height()))?;

    let rgb: Vec<u8> = image
        .as_raw()
        .chunks_exact(CHANNELS)
        .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
        .collect();

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, quality.clamp(1, 100));
    encoder
        .encode(&rgb, width, height, ColorType::Rgb)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_roundtrip_uniform() {
        let image = PixelBuffer::filled(16, 16, [100, 150, 200, 40]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.jpg");

        write_with_quality(&path, &image, 95).expect("Failed to write JPEG");
        let loaded = read(&path).expect("Failed to read JPEG");

        assert_eq!(loaded.dimensions(), (16, 16));
        for px in loaded.pixels() {
            assert_eq!(px[3], 255);
            assert!(px[0].abs_diff(100) <= 4);
            assert!(px[1].abs_diff(150) <= 4);
            assert!(px[2].abs_diff(200) <= 4);
        }
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode(Cursor::new(vec![0u8; 16])).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }
}
