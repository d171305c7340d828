//! JPEG encoding.
//!
//! JPEG carries double duty here: previews are encoded lossy to keep them
//! cheap to ship to the UI, and exports of rotated sheets are encoded at
//! maximum quality to lose as little as a lossy format allows.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use crate::decode::RgbBuffer;

use super::EncodeError;

/// Encode an RGB image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - Source pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality);
///   out-of-range values are clamped
///
/// # Returns
///
/// JPEG-encoded bytes on success.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for zero-sized images and
/// `EncodeError::InvalidPixelData` if the buffer length does not match its
/// declared dimensions.
pub fn encode_jpeg(image: &RgbBuffer, quality: u8) -> Result<Vec<u8>, EncodeError> {
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

    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(&image.pixels, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
