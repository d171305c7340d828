//! Quarter-turn rotation of sheet images.
//!
//! Viewing rotation is restricted to multiples of 90 degrees, so every
//! rotation here is an exact pixel permutation: no interpolation, no canvas
//! padding, and rotating four times returns the original image bit for bit.
//!
//! The rotation state accumulates clockwise. It is always applied to the
//! natural (upright-decoded) image in one step, never to an already-rotated
//! buffer, so repeated view changes cannot compound errors.

use crate::decode::RgbBuffer;

/// Accumulated clockwise viewing rotation for the active sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// No rotation; the natural orientation of the sheet.
    #[default]
    None,
    /// 90 degrees clockwise.
    Cw90,
    /// 180 degrees.
    Cw180,
    /// 270 degrees clockwise (90 counter-clockwise).
    Cw270,
}

impl Rotation {
    /// The state after one more clockwise quarter turn.
    pub fn rotated_right(self) -> Self {
        match self {
            Rotation::None => Rotation::Cw90,
            Rotation::Cw90 => Rotation::Cw180,
            Rotation::Cw180 => Rotation::Cw270,
            Rotation::Cw270 => Rotation::None,
        }
    }

    /// The state after one more counter-clockwise quarter turn.
    pub fn rotated_left(self) -> Self {
        match self {
            Rotation::None => Rotation::Cw270,
            Rotation::Cw90 => Rotation::None,
            Rotation::Cw180 => Rotation::Cw90,
            Rotation::Cw270 => Rotation::Cw180,
        }
    }

    /// Clockwise angle in degrees.
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }

    /// Whether applying this rotation swaps image width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Cw90 | Rotation::Cw270)
    }

    /// Whether this rotation leaves the image untouched.
    pub fn is_identity(self) -> bool {
        self == Rotation::None
    }
}

/// Apply a quarter-turn rotation to an image.
///
/// # Arguments
///
/// * `image` - Source image in natural orientation
/// * `rotation` - Accumulated clockwise rotation to apply
///
/// # Returns
///
/// A new `RgbBuffer` with the rotated content. Dimensions are swapped for
/// 90 and 270 degree turns.
pub fn apply_rotation(image: &RgbBuffer, rotation: Rotation) -> RgbBuffer {
    match rotation {
        Rotation::None => image.clone(),
        Rotation::Cw90 => rotate_90(image),
        Rotation::Cw180 => rotate_180(image),
        Rotation::Cw270 => rotate_270(image),
    }
}

/// Rotate 90 degrees clockwise: `dst(x, y) = src(y, src_h - 1 - x)`.
fn rotate_90(image: &RgbBuffer) -> RgbBuffer {
    let (src_w, src_h) = (image.width as usize, image.height as usize);
    let (dst_w, dst_h) = (src_h, src_w);
    let mut pixels = vec![0u8; dst_w * dst_h * 3];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let src_x = dst_y;
            let src_y = src_h - 1 - dst_x;
            copy_pixel(image, src_x, src_y, &mut pixels, dst_y * dst_w + dst_x);
        }
    }

    RgbBuffer::new(dst_w as u32, dst_h as u32, pixels)
}

/// Rotate 180 degrees: `dst(x, y) = src(w - 1 - x, h - 1 - y)`.
fn rotate_180(image: &RgbBuffer) -> RgbBuffer {
    let (src_w, src_h) = (image.width as usize, image.height as usize);
    let mut pixels = vec![0u8; src_w * src_h * 3];

    for dst_y in 0..src_h {
        for dst_x in 0..src_w {
            let src_x = src_w - 1 - dst_x;
            let src_y = src_h - 1 - dst_y;
            copy_pixel(image, src_x, src_y, &mut pixels, dst_y * src_w + dst_x);
        }
    }

    RgbBuffer::new(image.width, image.height, pixels)
}

/// Rotate 270 degrees clockwise: `dst(x, y) = src(src_w - 1 - y, x)`.
fn rotate_270(image: &RgbBuffer) -> RgbBuffer {
    let (src_w, src_h) = (image.width as usize, image.height as usize);
    let (dst_w, dst_h) = (src_h, src_w);
    let mut pixels = vec![0u8; dst_w * dst_h * 3];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let src_x = src_w - 1 - dst_y;
            let src_y = dst_x;
            copy_pixel(image, src_x, src_y, &mut pixels, dst_y * dst_w + dst_x);
        }
    }

    RgbBuffer::new(dst_w as u32, dst_h as u32, pixels)
}

#[inline]
fn copy_pixel(src: &RgbBuffer, src_x: usize, src_y: usize, dst: &mut [u8], dst_pixel: usize) {
    let src_idx = (src_y * src.width as usize + src_x) * 3;
    let dst_idx = dst_pixel * 3;
    dst[dst_idx..dst_idx + 3].copy_from_slice(&src.pixels[src_idx..src_idx + 3]);
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=32, 1u32..=32)
    }

    fn position_image(width: u32, height: u32) -> RgbBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x % 256) as u8);
                pixels.push((y % 256) as u8);
                pixels.push(((x * 7 + y * 13) % 256) as u8);
            }
        }
        RgbBuffer::new(width, height, pixels)
    }

    proptest! {
        #[test]
        fn prop_four_turns_identity((width, height) in dimensions_strategy()) {
            let img = position_image(width, height);

            let mut current = img.clone();
            for _ in 0..4 {
                current = apply_rotation(&current, Rotation::Cw90);
            }

            prop_assert_eq!(current, img);
        }

        #[test]
        fn prop_left_undoes_right((width, height) in dimensions_strategy()) {
            let img = position_image(width, height);

            let rotated = apply_rotation(&img, Rotation::Cw90);
            let restored = apply_rotation(&rotated, Rotation::Cw270);

            prop_assert_eq!(restored, img);
        }

        #[test]
        fn prop_dimension_swap_matches_predicate(
            (width, height) in dimensions_strategy(),
            turn in 0usize..4,
        ) {
            let rotation = [
                Rotation::None,
                Rotation::Cw90,
                Rotation::Cw180,
                Rotation::Cw270,
            ][turn];
            let img = position_image(width, height);
            let result = apply_rotation(&img, rotation);

            if rotation.swaps_dimensions() {
                prop_assert_eq!((result.width, result.height), (height, width));
            } else {
                prop_assert_eq!((result.width, result.height), (width, height));
            }
        }

        #[test]
        fn prop_rotation_preserves_pixel_count((width, height) in dimensions_strategy()) {
            let img = position_image(width, height);
            for rotation in [Rotation::Cw90, Rotation::Cw180, Rotation::Cw270] {
                let result = apply_rotation(&img, rotation);
                prop_assert_eq!(result.pixels.len(), img.pixels.len());
            }
        }
    }
}
