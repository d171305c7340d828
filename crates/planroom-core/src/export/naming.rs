//! Filename construction and validation for exported sheets.
//!
//! Exported files are named from the sheet's recognized (or hand-entered)
//! name and number. The rules are deliberately boring:
//! - `name` and `number` combine as `{name}-{number}`; either alone stands by
//!   itself
//! - characters that any mainstream filesystem rejects are refused up front,
//!   with the offending characters reported back
//! - the original file's extension is kept, lowercased, defaulting to `.jpg`
//!   when there is none
//! - collisions are resolved by suffixing `(1)`, `(2)`, ... before the
//!   extension

use std::path::Path;

use thiserror::Error;

/// Characters refused in export names, in the order they are reported.
pub const RESERVED_CHARACTERS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Errors produced while validating an export name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    /// Both the name and the number were empty
    #[error("a sheet name or number is required")]
    Empty,

    /// The combined name contains filesystem-reserved characters
    #[error("filename contains reserved characters: {found}")]
    Reserved { found: String },
}

/// Build the base filename (without extension) for an export.
///
/// Two non-empty parts join with a hyphen; a single non-empty part is used
/// as-is. Inputs are used verbatim, whitespace included.
///
/// # Errors
///
/// Returns `NameError::Empty` when both parts are empty and
/// `NameError::Reserved` when the combined name contains any of
/// [`RESERVED_CHARACTERS`]. The error lists every offender, space separated,
/// in reserved-set order.
pub fn base_name(name: &str, number: &str) -> Result<String, NameError> {
    if name.is_empty() && number.is_empty() {
        return Err(NameError::Empty);
    }

    let base = if !name.is_empty() && !number.is_empty() {
        format!("{name}-{number}")
    } else if !name.is_empty() {
        name.to_string()
    } else {
        number.to_string()
    };

    let found: Vec<String> = RESERVED_CHARACTERS
        .iter()
        .filter(|c| base.contains(**c))
        .map(|c| c.to_string())
        .collect();

    if !found.is_empty() {
        return Err(NameError::Reserved {
            found: found.join(" "),
        });
    }

    Ok(base)
}

/// The extension to export under, taken from the source file.
///
/// Lowercased and dot-prefixed; files without an extension export as `.jpg`.
pub fn export_extension(path: &Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_lowercase()),
        _ => ".jpg".to_string(),
    }
}

/// The filename to try for the given collision-probe attempt.
///
/// Attempt `0` is the plain `{base}{extension}`; attempt `n` is
/// `{base}(n){extension}`.
pub fn candidate(base: &str, extension: &str, attempt: u32) -> String {
    if attempt == 0 {
        format!("{base}{extension}")
    } else {
        format!("{base}({attempt}){extension}")
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
