//! Raster sheet decoding with EXIF orientation handling.
//!
//! Scanned drawings arrive as JPEG, PNG, BMP, GIF, WebP or TIFF files. The
//! decoder sniffs the actual format from the bytes (the extension is not
//! trusted), applies any embedded EXIF orientation so the caller always sees
//! an upright buffer, and flattens alpha/palette sources to plain RGB.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageError;
use image::ImageReader;

use super::{DecodeError, Orientation, RgbBuffer};

/// Decode a raster image from bytes, applying EXIF orientation correction.
///
/// # Arguments
///
/// * `bytes` - Raw image file bytes in any supported format
///
/// # Returns
///
/// An `RgbBuffer` with the orientation transform already applied, so its
/// dimensions are the natural (visually upright) dimensions of the sheet.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized and
/// `DecodeError::CorruptedFile` if decoding fails partway.
pub fn decode_raster(bytes: &[u8]) -> Result<RgbBuffer, DecodeError> {
    // Extract EXIF orientation before decoding; the pixel decoders ignore it
    let orientation = read_orientation(bytes);

    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    let oriented_img = apply_orientation(img, orientation);

    // Convert to RGB8, dropping alpha and expanding palettes
    let rgb_img = oriented_img.into_rgb8();
    Ok(RgbBuffer::from_rgb_image(rgb_img))
}

/// Extract the EXIF orientation from raw image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or the orientation
/// cannot be determined; the export engine uses this to decide whether a
/// plain byte copy preserves the sheet's appearance.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}

/// Apply an EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
