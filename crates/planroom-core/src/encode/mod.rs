//! Image encoding pipeline for Planroom.
//!
//! This module provides functionality for:
//! - Encoding images to JPEG format with configurable quality
//! - Encoding to the other raster formats sheets arrive in (PNG, BMP, GIF, WebP)
//!
//! Preview encoding trades fidelity for transfer size; export encoding keeps
//! every bit it can. The quality constants live with the callers, since the
//! right value depends on what the bytes are for.
//!
//! # Examples
//!
//! ```ignore
//! use planroom_core::decode::RgbBuffer;
//! use planroom_core::encode::encode_jpeg;
//!
//! let image = RgbBuffer::new(100, 100, vec![128u8; 100 * 100 * 3]);
//! let jpeg_bytes = encode_jpeg(&image, 85).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

use thiserror::Error;

mod jpeg;
mod raster;

pub use jpeg::encode_jpeg;
pub use raster::encode_raster;

/// Errors that can occur during image encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder rejected the image
    #[error("Image encoding failed: {0}")]
    EncodingFailed(String),
}
