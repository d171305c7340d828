//! PDF sheet rasterization via Pdfium.
//!
//! Plan sets are frequently delivered as PDF scans. Only the first page of a
//! document is rendered, at a fixed 2x scale over the page's point size, which
//! keeps fine linework legible when the preview is cropped.
//!
//! Pdfium is bound dynamically at runtime. The library is searched for next to
//! the executable first, then in the common system locations, then via the
//! platform loader. When no library can be found, rendering fails with
//! [`DecodeError::PdfiumUnavailable`] and raster sheets remain usable.

use pdfium_render::prelude::*;

use super::{DecodeError, RgbBuffer};

/// Scale factor applied to the page's point dimensions when rasterizing.
pub const PDF_RENDER_SCALE: f32 = 2.0;

/// Render the first page of a PDF document to an RGB buffer.
///
/// # Arguments
///
/// * `bytes` - Raw PDF file bytes
///
/// # Errors
///
/// Returns `DecodeError::PdfiumUnavailable` if no Pdfium library can be
/// bound, `DecodeError::EmptyPdf` for documents without pages, and
/// `DecodeError::CorruptedFile` / `DecodeError::PdfRenderFailed` for
/// documents that cannot be parsed or rendered.
pub fn render_pdf_page(bytes: &[u8]) -> Result<RgbBuffer, DecodeError> {
    let pdfium = bind_pdfium()?;

    let document = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if document.pages().len() == 0 {
        return Err(DecodeError::EmptyPdf);
    }

    let page = document
        .pages()
        .first()
        .map_err(|e| DecodeError::PdfRenderFailed(e.to_string()))?;

    let target_width = (page.width().value * PDF_RENDER_SCALE).round() as i32;
    let target_height = (page.height().value * PDF_RENDER_SCALE).round() as i32;
    if target_width < 1 || target_height < 1 {
        return Err(DecodeError::PdfRenderFailed(format!(
            "page has no printable area ({target_width}x{target_height})"
        )));
    }

    let config = PdfRenderConfig::new()
        .set_target_width(target_width)
        .set_target_height(target_height);

    let bitmap = page
        .render_with_config(&config)
        .map_err(|e| DecodeError::PdfRenderFailed(e.to_string()))?;

    Ok(bitmap_to_rgb(&bitmap))
}

/// Bind to a Pdfium library, preferring a copy shipped next to the binary.
fn bind_pdfium() -> Result<Pdfium, DecodeError> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("/usr/lib/"))
        })
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("/usr/local/lib/"))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| DecodeError::PdfiumUnavailable(e.to_string()))?;

    Ok(Pdfium::new(bindings))
}

/// Convert a rendered bitmap (BGRA byte order) into a plain RGB buffer.
fn bitmap_to_rgb(bitmap: &PdfBitmap) -> RgbBuffer {
    let width = bitmap.width() as u32;
    let height = bitmap.height() as u32;
    let bytes = bitmap.as_bytes();

    let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
    for chunk in bytes.chunks_exact(4) {
        pixels.push(chunk[2]);
        pixels.push(chunk[1]);
        pixels.push(chunk[0]);
    }

    RgbBuffer::new(width, height, pixels)
}
