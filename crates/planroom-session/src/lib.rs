//! Planroom session - stateful browsing, cropping and export of scanned
//! construction sheets.
//!
//! This crate drives planroom-core from a folder-level view: it owns which
//! sheet is showing, the pending rotation, label memory and export naming,
//! while the core crate does the pixel work.
//!
//! # Module Structure
//!
//! - `session` - The central state machine: open, navigate, rotate, OCR, export
//! - `listing` - Folder scanning and the supported file set
//! - `preview` - Deriving display-ready previews from sheet files
//! - `export` - Writing exports (byte-copy vs re-encode)
//! - `store` - Remembering sheet labels per folder
//! - `ocr` - The pluggable text-recognition seam
//! - `response` - Flat, serializable DTOs for a frontend
//! - `error` - Session error types
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use planroom_session::Session;
//!
//! let mut session = Session::new();
//! session.open_folder(Path::new("/plans/site-a"))?;
//! session.rotate_right()?;
//! session.set_export_dir("/plans/named");
//! let record = session.commit_export("Floor Plan", "A-101")?;
//! println!("written to {}", record.destination.display());
//! ```

pub mod error;
pub mod export;
pub mod listing;
pub mod ocr;
pub mod preview;
pub mod response;
pub mod session;
pub mod store;

// Re-export public types
pub use error::{ExportError, LoadError, SessionError};
pub use export::{ExportRecord, EXPORT_JPEG_QUALITY};
pub use listing::{list_folder, Sheet, SheetKind, SUPPORTED_EXTENSIONS};
pub use ocr::{RecognizeError, TextRecognizer};
pub use preview::{PageView, PREVIEW_JPEG_QUALITY, PREVIEW_MAX_EDGE};
pub use response::{ExportResponse, PageResponse, TextResponse};
pub use session::Session;
pub use store::{LabelStore, MemoryLabelStore, SheetLabel};

// Core types a caller needs alongside the session API
pub use planroom_core::{Rotation, SelectionRect};

/// Get the version of the crate
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
