//! Text recognition over cropped sheet regions.
//!
//! Sheet names and numbers usually live in a title block. The caller drags
//! a box around it, and the session hands the cropped pixels to a
//! [`TextRecognizer`] for transcription. Recognition is best-effort: the
//! session logs failures and falls back to an empty string, so a flaky OCR
//! backend never blocks browsing or export.

use planroom_core::RgbBuffer;
use thiserror::Error;

/// Errors a recognizer backend can report.
#[derive(Debug, Error)]
pub enum RecognizeError {
    /// The backend is not reachable (not configured, offline, ...)
    #[error("recognizer is unavailable: {0}")]
    Unavailable(String),

    /// The backend did not answer in time
    #[error("recognition timed out")]
    Timeout,

    /// The backend answered with an error
    #[error("recognition failed: {0}")]
    Failed(String),
}

/// A pluggable OCR backend.
///
/// Implementations receive the cropped region as raw RGB pixels and return
/// the transcribed text. How the pixels are encoded and shipped (HTTP call,
/// local model, ...) is the implementation's concern.
pub trait TextRecognizer {
    /// Transcribe whatever text is visible in `region`.
    fn recognize(&self, region: &RgbBuffer) -> Result<String, RecognizeError>;
}
