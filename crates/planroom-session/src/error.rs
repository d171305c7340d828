//! Error types for session operations.
//!
//! Every fallible session operation reports a [`SessionError`]. Low-level
//! failures (filesystem, decoding, encoding) are wrapped together with the
//! path they occurred on, so callers can present a usable message without
//! walking the source chain.

use std::path::PathBuf;

use planroom_core::{DecodeError, EncodeError, NameError};
use thiserror::Error;

/// Failure while reading a sheet from disk and turning it into pixels.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The bytes could not be decoded or rasterized
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The preview could not be encoded
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Failure while writing an exported sheet.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The source could not be read or the destination could not be written
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The source could not be decoded for re-encoding
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The rotated pixels could not be encoded in the destination format
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Errors reported by [`Session`](crate::Session) operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An operation needs an open sheet and there is none
    #[error("no sheet is open")]
    NoActiveSheet,

    /// The folder was readable but held no files the session can open
    #[error("no sheets found in {}", .path.display())]
    NoSheetsInFolder {
        /// The folder that was scanned
        path: PathBuf,
    },

    /// A 1-based page number outside the current sheet list
    #[error("page {given} is out of range, expected 1-{total}")]
    OutOfRange {
        /// The page number that was asked for
        given: usize,
        /// How many sheets are open
        total: usize,
    },

    /// A sheet failed to load or render
    #[error("failed to load {}", .path.display())]
    LoadFailure {
        /// The file that failed
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    /// The export name was rejected
    #[error(transparent)]
    Validation(#[from] NameError),

    /// Export was requested before an export folder was chosen
    #[error("no export folder has been chosen")]
    ExportDirUnset,

    /// The export could not be written
    #[error("failed to export to {}", .path.display())]
    ExportFailure {
        /// The destination that failed
        path: PathBuf,
        #[source]
        source: ExportError,
    },
}
