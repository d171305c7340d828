//! Folder scanning for sheet files.
//!
//! A "sheet" is any file the session can open: the common raster formats
//! plus PDFs (only the first page is shown). Scanning is flat — subfolders
//! are not descended into — and the result is sorted by path so the
//! browsing order is stable across platforms.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File extensions picked up when scanning a folder, lowercase.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp", "pdf"];

/// How a sheet's pixels are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    /// A raster image decoded directly
    Raster,
    /// A PDF whose first page is rasterized
    Pdf,
}

/// A single openable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Full path to the file
    pub path: PathBuf,
    /// Raster or PDF
    pub kind: SheetKind,
}

impl Sheet {
    /// Wrap a path, classifying it by extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = if extension_of(&path).as_deref() == Some("pdf") {
            SheetKind::Pdf
        } else {
            SheetKind::Raster
        };
        Sheet { path, kind }
    }

    /// The file name component, lossily converted for display.
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Whether a path has one of the supported extensions.
pub fn is_supported(path: &Path) -> bool {
    match extension_of(path) {
        Some(ext) => SUPPORTED_EXTENSIONS.contains(&ext.as_str()),
        None => false,
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Scan a folder for sheets.
///
/// Only plain files directly inside `dir` with a supported extension are
/// returned, sorted by path. The extension check is case-insensitive.
/// Entries that cannot be read are skipped rather than aborting the scan.
///
/// # Errors
///
/// Returns the underlying I/O error if the folder itself cannot be read.
pub fn list_folder(dir: &Path) -> io::Result<Vec<Sheet>> {
    let mut sheets = Vec::new();
    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if path.is_file() && is_supported(&path) {
            sheets.push(Sheet::from_path(path));
        }
    }
    sheets.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(sheets)
}
