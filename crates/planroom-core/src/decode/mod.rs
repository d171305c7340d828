//! Sheet decoding pipeline for Planroom.
//!
//! This module provides functionality for:
//! - Decoding raster scans (JPEG, PNG, BMP, GIF, WebP, TIFF)
//! - Normalizing EXIF orientation so callers always see upright pixels
//! - Rasterizing the first page of PDF plan sets at a fixed 2x scale
//! - Downscaling oversized sheets to a display ceiling with a recorded ratio
//!
//! # Architecture
//!
//! Every decoder takes raw bytes and produces an [`RgbBuffer`]; no file I/O
//! happens here. Orientation is folded in during decode, so the rest of the
//! pipeline only ever deals in natural (visually upright) dimensions.
//!
//! # Examples
//!
//! ```ignore
//! use planroom_core::decode::{decode_raster, fit_within};
//!
//! let bytes = std::fs::read("sheet-a1.jpg").unwrap();
//! let image = decode_raster(&bytes).unwrap();
//! let fitted = fit_within(&image, 4200).unwrap();
//! println!("Preview {}x{} at ratio {}", fitted.image.width, fitted.image.height, fitted.ratio);
//! ```

mod pdf;
mod raster;
mod resize;
mod types;

pub use pdf::{render_pdf_page, PDF_RENDER_SCALE};
pub use raster::{decode_raster, read_orientation};
pub use resize::{fit_within, resize, FittedImage};
pub use types::{DecodeError, Orientation, RgbBuffer};
