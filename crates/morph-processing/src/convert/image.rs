//! Image conversion, fully in-process.
//!
//! The only converter with no external tool: decode with the `image`
//! crate, normalize the color mode for the target, re-encode with fixed
//! per-format quality defaults. Decode and encode are CPU-bound, so the
//! whole operation runs on the blocking pool.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat};

use super::ConversionError;

/// JPEG quality (0-100).
const JPEG_QUALITY: f32 = 95.0;
/// WebP lossy quality (0-100).
const WEBP_QUALITY: f32 = 90.0;

pub(crate) const TARGETS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff"];

pub struct ImageConverter;

impl ImageConverter {
    pub fn new() -> Self {
        Self
    }

    pub async fn convert(
        &self,
        input: &Path,
        output: &Path,
        target: &str,
    ) -> Result<(), ConversionError> {
        if !TARGETS.contains(&target) {
            return Err(ConversionError::UnsupportedFormat {
                target: target.to_string(),
            });
        }

        let input = input.to_path_buf();
        let output = output.to_path_buf();
        let target = target.to_string();
        tokio::task::spawn_blocking(move || convert_blocking(&input, &output, &target))
            .await
            .map_err(|e| ConversionError::ImageProcessing(format!("worker panicked: {e}")))?
    }
}

impl Default for ImageConverter {
    fn default() -> Self {
        Self::new()
    }
}

fn convert_blocking(input: &Path, output: &Path, target: &str) -> Result<(), ConversionError> {
    let img = image::ImageReader::open(input)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| ConversionError::ImageProcessing(e.to_string()))?;

    let data = match target {
        // JPEG has no alpha channel: flatten transparency onto white.
        "jpg" | "jpeg" => encode_jpeg(&flatten_onto_white(&img))?,
        "png" => encode_with_format(&img, ImageFormat::Png)?,
        "webp" => encode_webp(&img)?,
        "gif" => encode_with_format(&DynamicImage::ImageRgba8(img.to_rgba8()), ImageFormat::Gif)?,
        "bmp" => encode_with_format(&DynamicImage::ImageRgb8(img.to_rgb8()), ImageFormat::Bmp)?,
        "tiff" => encode_with_format(&img, ImageFormat::Tiff)?,
        other => {
            return Err(ConversionError::UnsupportedFormat {
                target: other.to_string(),
            })
        }
    };

    std::fs::write(output, data)?;
    Ok(())
}

/// Composite the image over an opaque white background, discarding the
/// alpha channel.
fn flatten_onto_white(img: &DynamicImage) -> image::RgbImage {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = image::RgbImage::new(width, height);
    for (x, y, px) in rgba.enumerate_pixels() {
        let alpha = px[3] as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha)) / 255) as u8;
        out.put_pixel(x, y, image::Rgb([blend(px[0]), blend(px[1]), blend(px[2])]));
    }
    out
}

/// Encode to JPEG with mozjpeg: fixed quality, optimized coding.
fn encode_jpeg(rgb: &image::RgbImage) -> Result<Vec<u8>, ConversionError> {
    let (width, height) = rgb.dimensions();

    let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
    comp.set_size(width as usize, height as usize);
    comp.set_quality(JPEG_QUALITY);
    comp.set_progressive_mode();
    comp.set_optimize_coding(true);

    let mut comp = comp
        .start_compress(Vec::new())
        .map_err(|e| ConversionError::ImageProcessing(e.to_string()))?;
    comp.write_scanlines(rgb)
        .map_err(|e| ConversionError::ImageProcessing(e.to_string()))?;
    comp.finish()
        .map_err(|e| ConversionError::ImageProcessing(e.to_string()))
}

/// Encode to lossy WebP.
fn encode_webp(img: &DynamicImage) -> Result<Vec<u8>, ConversionError> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let encoder = webp::Encoder::from_rgba(&rgba, width, height);
    let data = encoder.encode(WEBP_QUALITY);
    Ok(data.to_vec())
}

/// Encode through the `image` crate's own encoders (PNG, GIF, BMP, TIFF).
fn encode_with_format(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, ConversionError> {
    let mut buffer = Vec::new();
    let mut cursor = Cursor::new(&mut buffer);
    img.write_to(&mut cursor, format)
        .map_err(|e| ConversionError::ImageProcessing(e.to_string()))?;
    Ok(buffer)
}
