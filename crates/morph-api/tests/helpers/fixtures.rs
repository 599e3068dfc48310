//! Sample payloads for upload tests.

use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// A small PNG with a fully transparent red canvas: converting it to a
/// JPEG exercises the alpha-flattening path.
pub fn png_with_alpha() -> Vec<u8> {
    let img = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 0]));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("encode fixture png");
    buffer
}

/// A minimal canonical WAV header (44 bytes, zero samples). Sniffs as
/// audio without needing any real recording.
pub fn minimal_wav() -> Vec<u8> {
    let mut wav = Vec::with_capacity(44);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&36u32.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&44100u32.to_le_bytes());
    wav.extend_from_slice(&88200u32.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&0u32.to_le_bytes());
    wav
}
