//! Rendering sheets into browser-ready previews.
//!
//! A preview is built fresh from the file on every derivation: read, decode
//! (or rasterize the first PDF page), apply the session's rotation, fit
//! within the display ceiling, and encode as a base64 JPEG data URL. Nothing
//! is cached between operations, so an edited file shows its new content on
//! the next navigation.

use std::fs;
use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use planroom_core::decode::{decode_raster, fit_within, render_pdf_page};
use planroom_core::encode::encode_jpeg;
use planroom_core::transform::apply_rotation;
use planroom_core::{RgbBuffer, Rotation};

use crate::error::LoadError;
use crate::listing::{Sheet, SheetKind};

/// Longest edge, in pixels, a preview is allowed to have.
pub const PREVIEW_MAX_EDGE: u32 = 4200;

/// JPEG quality used for previews. Exports use their own, higher setting.
pub const PREVIEW_JPEG_QUALITY: u8 = 85;

/// Everything a caller needs to show one sheet.
///
/// Dimensions are recorded after rotation: `original_width`/`original_height`
/// are the full-resolution rotated size, `display_width`/`display_height` the
/// preview size actually encoded. `downscale_ratio` is the scale between them
/// (1.0 when the sheet already fit the ceiling; never above 1.0).
#[derive(Debug, Clone)]
pub struct PageView {
    /// `data:image/jpeg;base64,...` preview of the rotated sheet
    pub preview: String,
    /// File name of the sheet
    pub filename: String,
    /// Full path of the sheet
    pub path: PathBuf,
    /// 0-based position in the sheet list
    pub index: usize,
    /// Number of sheets open
    pub total: usize,
    /// Width of the encoded preview
    pub display_width: u32,
    /// Height of the encoded preview
    pub display_height: u32,
    /// Full-resolution width after rotation
    pub original_width: u32,
    /// Full-resolution height after rotation
    pub original_height: u32,
    /// Preview size over original size, at most 1.0
    pub downscale_ratio: f64,
}

/// Read a sheet from disk and decode it to pixels, EXIF-upright.
pub(crate) fn load_natural(sheet: &Sheet) -> Result<RgbBuffer, LoadError> {
    let bytes = fs::read(&sheet.path)?;
    let image = match sheet.kind {
        SheetKind::Pdf => render_pdf_page(&bytes)?,
        SheetKind::Raster => decode_raster(&bytes)?,
    };
    Ok(image)
}

/// Load a sheet and apply the session's rotation.
pub(crate) fn load_rotated(sheet: &Sheet, rotation: Rotation) -> Result<RgbBuffer, LoadError> {
    let natural = load_natural(sheet)?;
    Ok(apply_rotation(&natural, rotation))
}

/// Build the full [`PageView`] for one sheet.
pub(crate) fn render_page_view(
    sheet: &Sheet,
    rotation: Rotation,
    index: usize,
    total: usize,
) -> Result<PageView, LoadError> {
    let rotated = load_rotated(sheet, rotation)?;
    let fitted = fit_within(&rotated, PREVIEW_MAX_EDGE)?;
    let jpeg = encode_jpeg(&fitted.image, PREVIEW_JPEG_QUALITY)?;
    let preview = format!("data:image/jpeg;base64,{}", STANDARD.encode(&jpeg));

    Ok(PageView {
        preview,
        filename: sheet.filename(),
        path: sheet.path.clone(),
        index,
        total,
        display_width: fitted.image.width,
        display_height: fitted.image.height,
        original_width: rotated.width,
        original_height: rotated.height,
        downscale_ratio: fitted.ratio,
    })
}
