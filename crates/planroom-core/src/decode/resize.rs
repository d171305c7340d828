//! Downscaling for display previews.
//!
//! Scanned sheets are often far larger than any screen. The preview pipeline
//! shrinks them to fit within a square ceiling while recording the exact
//! scale factor that was applied, so selections made against the preview can
//! be mapped back to original pixels. Images that already fit are passed
//! through untouched; nothing is ever upscaled.

use super::{DecodeError, RgbBuffer};

/// A preview-sized image together with the scale factor that produced it.
///
/// `ratio` is the factor the original dimensions were multiplied by, and is
/// always in `(0.0, 1.0]`. It is captured here, at resize time, and carried
/// alongside the pixels so later stages never have to re-derive it.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedImage {
    /// The downscaled (or passed-through) pixels.
    pub image: RgbBuffer,
    /// Applied scale factor; `1.0` when the source already fit.
    pub ratio: f64,
}

/// Resize an image to exact dimensions using Lanczos resampling.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is
/// zero and `DecodeError::CorruptedFile` if the source buffer is malformed.
pub fn resize(image: &RgbBuffer, width: u32, height: u32) -> Result<RgbBuffer, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized =
        image::imageops::resize(&rgb_image, width, height, image::imageops::FilterType::Lanczos3);

    Ok(RgbBuffer::from_rgb_image(resized))
}

/// Shrink an image so both edges fit within `ceiling`, preserving aspect
/// ratio and recording the applied scale factor.
///
/// The scale factor is `min(ceiling / width, ceiling / height)`, capped at
/// `1.0`: an image that already fits is cloned unchanged with a ratio of
/// exactly `1.0`. Target dimensions are truncated, not rounded, so the
/// result never exceeds the ceiling on either edge.
///
/// # Arguments
///
/// * `image` - The source image
/// * `ceiling` - Maximum length of either edge in pixels
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if `ceiling` is zero or the
/// source has a zero edge.
pub fn fit_within(image: &RgbBuffer, ceiling: u32) -> Result<FittedImage, DecodeError> {
    if ceiling == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: ceiling,
            height: ceiling,
        });
    }
    if image.width == 0 || image.height == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    // Already fits: pass through with an identity ratio
    if image.width <= ceiling && image.height <= ceiling {
        return Ok(FittedImage {
            image: image.clone(),
            ratio: 1.0,
        });
    }

    let ratio = (ceiling as f64 / image.width as f64).min(ceiling as f64 / image.height as f64);

    // Truncate target dimensions; a rounded-up edge could poke past the ceiling
    let target_width = ((image.width as f64 * ratio) as u32).max(1);
    let target_height = ((image.height as f64 * ratio) as u32).max(1);

    let resized = resize(image, target_width, target_height)?;

    Ok(FittedImage {
        image: resized,
        ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> RgbBuffer {
        // Create a simple gradient image for testing
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8); // R
                pixels.push(((y * 255) / height.max(1)) as u8); // G
                pixels.push(128); // B
            }
        }
        RgbBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 100, 50).unwrap();

        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(resize(&img, 0, 50).is_err());
        assert!(resize(&img, 50, 0).is_err());
    }

    #[test]
    fn test_fit_within_landscape() {
        let img = create_test_image(6000, 4000);
        let fitted = fit_within(&img, 4200).unwrap();

        // Width constrains: ratio = 4200/6000 = 0.7
        assert_eq!(fitted.image.width, 4200);
        assert_eq!(fitted.image.height, 2800);
        assert!((fitted.ratio - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_fit_within_portrait() {
        let img = create_test_image(4000, 6000);
        let fitted = fit_within(&img, 4200).unwrap();

        assert_eq!(fitted.image.width, 2800);
        assert_eq!(fitted.image.height, 4200);
        assert!((fitted.ratio - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_fit_within_truncates_fractional_edge() {
        // ratio = 4200/6001; 4000 * ratio = 2799.53..., which must truncate
        let img = create_test_image(6001, 4000);
        let fitted = fit_within(&img, 4200).unwrap();

        assert_eq!(fitted.image.width, 4200);
        assert_eq!(fitted.image.height, 2799);
    }

    #[test]
    fn test_fit_within_already_fits() {
        let img = create_test_image(800, 600);
        let fitted = fit_within(&img, 4200).unwrap();

        assert_eq!(fitted.image, img);
        assert_eq!(fitted.ratio, 1.0);
    }

    #[test]
    fn test_fit_within_exact_ceiling() {
        let img = create_test_image(4200, 100);
        let fitted = fit_within(&img, 4200).unwrap();

        // Exactly at the ceiling counts as fitting; no resample
        assert_eq!(fitted.image, img);
        assert_eq!(fitted.ratio, 1.0);
    }

    #[test]
    fn test_fit_within_never_upscales() {
        let img = create_test_image(120, 80);
        let fitted = fit_within(&img, 4200).unwrap();

        assert_eq!(fitted.image.width, 120);
        assert_eq!(fitted.image.height, 80);
    }

    #[test]
    fn test_fit_within_extreme_aspect_keeps_min_edge() {
        // 10000x10 at ceiling 4200: height would truncate to 4, not 0
        let img = create_test_image(10000, 10);
        let fitted = fit_within(&img, 4200).unwrap();

        assert_eq!(fitted.image.width, 4200);
        assert!(fitted.image.height >= 1);
    }

    #[test]
    fn test_fit_within_zero_ceiling_error() {
        let img = create_test_image(100, 50);
        assert!(fit_within(&img, 0).is_err());
    }

    #[test]
    fn test_fit_within_empty_source_error() {
        let img = RgbBuffer::new(0, 0, Vec::new());
        assert!(fit_within(&img, 4200).is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
