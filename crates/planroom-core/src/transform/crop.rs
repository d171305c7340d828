//! Extracting pixel regions from sheet images.
//!
//! Cropping takes a [`PixelRect`] that has already been mapped into original
//! image coordinates. The rectangle is defensively re-clamped against the
//! actual buffer, so a caller holding stale dimensions gets a trimmed crop
//! instead of a panic.
//!
//! An empty rectangle produces an empty buffer. Callers treat that as "no
//! region selected" and skip whatever they were about to do with the pixels.

use crate::decode::RgbBuffer;

use super::PixelRect;

/// Copy the pixels covered by `rect` out of an image.
///
/// # Arguments
///
/// * `image` - Source image
/// * `rect` - Region in original pixel coordinates
///
/// # Returns
///
/// A new `RgbBuffer` containing only the covered region. If the rectangle is
/// empty or lies entirely outside the image, the result is a `0x0` buffer.
pub fn crop_pixels(image: &RgbBuffer, rect: PixelRect) -> RgbBuffer {
    if rect.is_empty() {
        return RgbBuffer::new(0, 0, Vec::new());
    }

    // Re-clamp against the buffer we actually hold
    let left = rect.x.min(image.width);
    let top = rect.y.min(image.height);
    let right = rect.x.saturating_add(rect.width).min(image.width);
    let bottom = rect.y.saturating_add(rect.height).min(image.height);

    let out_width = right.saturating_sub(left);
    let out_height = bottom.saturating_sub(top);
    if out_width == 0 || out_height == 0 {
        return RgbBuffer::new(0, 0, Vec::new());
    }

    let mut output = vec![0u8; (out_width * out_height * 3) as usize];

    // Copy row slices; rows are contiguous in RGB24
    let src_stride = image.width as usize * 3;
    let dst_stride = out_width as usize * 3;
    for y in 0..out_height as usize {
        let src_start = (top as usize + y) * src_stride + left as usize * 3;
        let dst_start = y * dst_stride;
        output[dst_start..dst_start + dst_stride]
            .copy_from_slice(&image.pixels[src_start..src_start + dst_stride]);
    }

    RgbBuffer::new(out_width, out_height, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
