//! Benchmark fixtures for gblur.
//!
//! Run with: `cargo bench -p gblur-bench`

use gblur_core::{PixelBuffer, Result, CHANNELS};

/// Deterministic xorshift RGBA noise of the given size.
pub fn noise_image(width: u32, height: u32, seed: u64) -> Result<PixelBuffer> {
    let mut state = seed | 1;
    let len = width as usize * height as usize * CHANNELS;
    let data = (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 56) as u8
        })
        .collect();
    PixelBuffer::from_raw(width, height, data)
}
