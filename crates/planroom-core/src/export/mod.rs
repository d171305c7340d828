//! Export planning: naming rules and the copy-or-re-encode decision.
//!
//! This module provides functionality for:
//! - Validating and composing export filenames from sheet name and number
//! - Resolving filename collisions with `(1)`, `(2)`, ... probe suffixes
//! - Deciding whether a sheet can be exported as a byte-for-byte copy
//!
//! The decision logic is pure; actually touching the filesystem is the
//! session layer's job.

mod naming;

pub use naming::{base_name, candidate, export_extension, NameError, RESERVED_CHARACTERS};

use crate::decode::Orientation;
use crate::transform::Rotation;

/// Whether exporting a raster sheet requires decoding and re-encoding it.
///
/// A byte-for-byte copy preserves the most fidelity, but it is only faithful
/// when nothing about the sheet's appearance changes: no viewing rotation is
/// applied and any embedded EXIF orientation is upright (or absent). In every
/// other case the export pipeline decodes, rotates and re-encodes.
pub fn needs_reencode(rotation: Rotation, orientation: Orientation) -> bool {
    !rotation.is_identity() || !orientation.is_upright()
}
