//! Mapping display-space selections back to original pixels.
//!
//! The UI reports crop selections in the coordinate space of the preview it
//! renders, along with the preview's dimensions. Because the preview may have
//! been downscaled, selections must be scaled back up before cropping the
//! full-resolution sheet.
//!
//! Scales are derived per axis from the dimensions the caller actually
//! displayed, not from the recorded downscale ratio, so a stale or mismatched
//! preview degrades to a clamped crop instead of an out-of-bounds one. All
//! products are truncated toward zero and clamped into the original image,
//! which means a selection can legitimately map to an empty region.

use serde::{Deserialize, Serialize};

/// A selection drawn on the preview, in display coordinates.
///
/// Coordinates are fractional because browsers and canvases report them that
/// way. `display_width`/`display_height` are the dimensions of the preview
/// the selection was made against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub display_width: f64,
    pub display_height: f64,
}

/// An axis-aligned region in original image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Whether this rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Map a display-space selection into original image pixels.
///
/// # Arguments
///
/// * `selection` - The selection with the display dimensions it was made in
/// * `original_width` - Width of the full-resolution image
/// * `original_height` - Height of the full-resolution image
///
/// # Returns
///
/// A `PixelRect` clamped to `[0, original]` on both axes. Selections that
/// fall outside the image, or that are zero-sized or inverted, come back
/// empty rather than failing.
pub fn map_selection(
    selection: &SelectionRect,
    original_width: u32,
    original_height: u32,
) -> PixelRect {
    // A non-positive display dimension means the caller's preview state is
    // broken; fall back to treating the selection as original-space
    let scale_x = if selection.display_width > 0.0 {
        original_width as f64 / selection.display_width
    } else {
        1.0
    };
    let scale_y = if selection.display_height > 0.0 {
        original_height as f64 / selection.display_height
    } else {
        1.0
    };

    let max_x = original_width as i64;
    let max_y = original_height as i64;

    // `as i64` truncates toward zero and saturates, so hostile floats
    // (NaN, infinities) collapse to safe values before clamping
    let x = ((selection.x * scale_x) as i64).clamp(0, max_x);
    let y = ((selection.y * scale_y) as i64).clamp(0, max_y);
    let w = (selection.width * scale_x) as i64;
    let h = (selection.height * scale_y) as i64;

    let x2 = x.saturating_add(w).clamp(0, max_x);
    let y2 = y.saturating_add(h).clamp(0, max_y);

    PixelRect {
        x: x as u32,
        y: y as u32,
        width: (x2 - x).max(0) as u32,
        height: (y2 - y).max(0) as u32,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_mapped_rect_stays_in_bounds(
            x in -500.0f64..1500.0,
            y in -500.0f64..1500.0,
            w in -500.0f64..1500.0,
            h in -500.0f64..1500.0,
            original_width in 1u32..5000,
            original_height in 1u32..5000,
            display_width in 1.0f64..2000.0,
            display_height in 1.0f64..2000.0,
        ) {
            let sel = SelectionRect {
                x,
                y,
                width: w,
                height: h,
                display_width,
                display_height,
            };
            let rect = map_selection(&sel, original_width, original_height);

            prop_assert!(rect.x <= original_width);
            prop_assert!(rect.y <= original_height);
            prop_assert!(rect.x + rect.width <= original_width);
            prop_assert!(rect.y + rect.height <= original_height);
        }

        #[test]
        fn prop_round_trip_within_one_display_pixel(
            display_width in 100.0f64..2000.0,
            display_height in 100.0f64..2000.0,
            scale in 1.0f64..8.0,
            fx in 0.0f64..0.5,
            fy in 0.0f64..0.5,
            fw in 0.1f64..0.4,
            fh in 0.1f64..0.4,
        ) {
            // Preview is a downscale of the original by `scale`
            let original_width = (display_width * scale) as u32;
            let original_height = (display_height * scale) as u32;

            let sel = SelectionRect {
                x: display_width * fx,
                y: display_height * fy,
                width: display_width * fw,
                height: display_height * fh,
                display_width,
                display_height,
            };

            let rect = map_selection(&sel, original_width, original_height);

            let scale_x = original_width as f64 / display_width;
            let scale_y = original_height as f64 / display_height;

            // Truncation loses less than one original pixel per edge; mapped
            // back to display space that is at most one display pixel
            prop_assert!((rect.x as f64 / scale_x - sel.x).abs() <= 1.0);
            prop_assert!((rect.y as f64 / scale_y - sel.y).abs() <= 1.0);
            prop_assert!((rect.width as f64 / scale_x - sel.width).abs() <= 1.0);
            prop_assert!((rect.height as f64 / scale_y - sel.height).abs() <= 1.0);
        }
    }
}
