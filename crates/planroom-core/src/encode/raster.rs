//! Encoding to non-JPEG raster formats.
//!
//! When a cropped or rotated sheet is exported, it is written back in the
//! format its filename promises. JPEG goes through the quality-controlled
//! encoder; everything else lands here. PNG and BMP are lossless; GIF is
//! quantized by the encoder and WebP is written lossless.

use std::io::Cursor;

use image::ImageFormat;

use crate::decode::RgbBuffer;

use super::EncodeError;

/// Encode an RGB image in the given format.
///
/// # Arguments
///
/// * `image` - Source pixels
/// * `format` - Target format; JPEG is accepted but uses the encoder's
///   default quality, so callers wanting control use `encode_jpeg`
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` / `EncodeError::InvalidPixelData`
/// for malformed buffers and `EncodeError::EncodingFailed` if the format
/// encoder rejects the image.
pub fn encode_raster(image: &RgbBuffer, format: ImageFormat) -> Result<Vec<u8>, EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected_len = (image.width as usize) * (image.height as usize) * 3;
    if image.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| EncodeError::EncodingFailed("Failed to create RgbImage".to_string()))?;

    let mut buffer = Cursor::new(Vec::new());
    rgb_image
        .write_to(&mut buffer, format)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
