//! Image transformation operations: rotation, selection mapping and cropping.
//!
//! This module covers everything between "pixels were decoded" and "pixels
//! are ready to encode":
//! 1. Quarter-turn viewing rotation, applied to the natural image
//! 2. Mapping a display-space selection back into original coordinates
//! 3. Cropping the mapped region out of the full-resolution image
//!
//! # Coordinate System
//!
//! - Rotation is clockwise in 90 degree steps
//! - Selections arrive in display pixels together with the display size
//! - Crop rectangles are absolute original-image pixels
//! - Origin is top-left corner

mod crop;
mod rotation;
mod select;

pub use crop::crop_pixels;
pub use rotation::{apply_rotation, Rotation};
pub use select::{map_selection, PixelRect, SelectionRect};
