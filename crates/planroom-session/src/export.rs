//! Writing exported sheets to disk.
//!
//! Exports preserve the source wherever possible. A PDF is always copied
//! byte-for-byte (the viewer only rasterizes page one, but the export keeps
//! every page). A raster is copied too, unless the view was rotated or the
//! file carries a non-upright EXIF orientation; in that case the rotated,
//! upright pixels are re-encoded in the destination format at maximum
//! quality. Name collisions are resolved by probing `{base}(1){ext}`,
//! `{base}(2){ext}`, ... until a free filename is found.

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use planroom_core::decode::{decode_raster, read_orientation};
use planroom_core::encode::{encode_jpeg, encode_raster};
use planroom_core::export::{candidate, needs_reencode};
use planroom_core::transform::apply_rotation;
use planroom_core::{EncodeError, RgbBuffer, Rotation};

use crate::error::{ExportError, SessionError};
use crate::listing::{Sheet, SheetKind};
use crate::preview::PageView;

/// JPEG quality for re-encoded exports. Scanned line work smears at lower
/// settings, so this stays at the ceiling.
pub const EXPORT_JPEG_QUALITY: u8 = 100;

/// The outcome of a successful export.
#[derive(Debug)]
pub struct ExportRecord {
    /// Where the sheet was written
    pub destination: PathBuf,
    /// Whether pixels were re-encoded rather than byte-copied
    pub reencoded: bool,
    /// The sheet showing after the post-export advance.
    ///
    /// The export itself succeeded even when this is `Err`: the session has
    /// already moved on, and a later refresh can retry the render.
    pub view: Result<PageView, SessionError>,
}

/// The first non-colliding destination for `base` + `extension`.
pub(crate) fn resolve_destination(export_dir: &Path, base: &str, extension: &str) -> PathBuf {
    let mut attempt = 0;
    loop {
        let path = export_dir.join(candidate(base, extension, attempt));
        if !path.exists() {
            return path;
        }
        attempt += 1;
    }
}

/// Write one sheet to `destination`, honoring the view rotation.
///
/// Returns `true` when the pixels were re-encoded, `false` when the file
/// was copied byte-for-byte.
pub(crate) fn write_export(
    sheet: &Sheet,
    rotation: Rotation,
    destination: &Path,
) -> Result<bool, ExportError> {
    if sheet.kind == SheetKind::Pdf {
        fs::copy(&sheet.path, destination)?;
        return Ok(false);
    }

    let bytes = fs::read(&sheet.path)?;
    let orientation = read_orientation(&bytes);
    if !needs_reencode(rotation, orientation) {
        fs::copy(&sheet.path, destination)?;
        return Ok(false);
    }

    // decode_raster bakes the EXIF orientation in, so the written pixels
    // are upright plus the view rotation, with no orientation tag left over
    let natural = decode_raster(&bytes)?;
    let rotated = apply_rotation(&natural, rotation);
    let encoded = encode_for_destination(&rotated, destination)?;
    fs::write(destination, encoded)?;
    Ok(true)
}

fn encode_for_destination(image: &RgbBuffer, destination: &Path) -> Result<Vec<u8>, EncodeError> {
    let format = destination
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ImageFormat::from_extension)
        .ok_or_else(|| {
            EncodeError::EncodingFailed(format!("no encoder for {}", destination.display()))
        })?;

    match format {
        ImageFormat::Jpeg => encode_jpeg(image, EXPORT_JPEG_QUALITY),
        other => encode_raster(image, other),
    }
}
