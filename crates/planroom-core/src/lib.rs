//! Planroom Core - Sheet image pipeline
//!
//! This crate provides the image-side functionality for Planroom: decoding
//! scanned sheets (raster and PDF), quarter-turn viewing rotation, mapping
//! display selections back to original pixels, cropping, encoding, and the
//! naming rules for exported files.
//!
//! Everything here is pure with respect to the environment: bytes and
//! buffers in, bytes and buffers out. File I/O, session state and the
//! request/response surface live in `planroom-session`.

pub mod decode;
pub mod encode;
pub mod export;
pub mod transform;

pub use decode::{DecodeError, FittedImage, Orientation, RgbBuffer};
pub use encode::EncodeError;
pub use export::NameError;
pub use transform::{PixelRect, Rotation, SelectionRect};
