//! Serializable responses for a frontend.
//!
//! The session API returns rich Rust types; a UI layer usually wants one
//! flat JSON object per call. These wrappers flatten a result into that
//! shape: `success: true` plus the populated fields on the happy path,
//! `success: false` plus `message` otherwise. Absent fields are omitted
//! from the JSON entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::export::ExportRecord;
use crate::preview::PageView;

/// One sheet, flattened for the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    /// Whether the operation succeeded
    pub success: bool,
    /// Preview data URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filepath: Option<String>,
    /// 0-based index of the sheet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    /// Preview width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Preview height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Full-resolution width after rotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_height: Option<u32>,
    /// The open folder; set only by the opening operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_path: Option<String>,
    /// Human-readable failure description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PageResponse {
    /// Flatten a derived view, or the error it failed with.
    pub fn from_result(result: Result<PageView, SessionError>) -> Self {
        match result {
            Ok(view) => PageResponse {
                success: true,
                image: Some(view.preview),
                filename: Some(view.filename),
                filepath: Some(view.path.to_string_lossy().into_owned()),
                index: Some(view.index),
                total: Some(view.total),
                width: Some(view.display_width),
                height: Some(view.display_height),
                original_width: Some(view.original_width),
                original_height: Some(view.original_height),
                folder_path: None,
                message: None,
            },
            Err(err) => PageResponse::failure(err.to_string()),
        }
    }

    /// A bare failure response.
    pub fn failure(message: impl Into<String>) -> Self {
        PageResponse {
            message: Some(message.into()),
            ..PageResponse::default()
        }
    }

    /// Attach the folder path. The opening operations use this so the
    /// frontend learns which folder it is now browsing.
    pub fn with_folder(mut self, folder: &Path) -> Self {
        self.folder_path = Some(folder.to_string_lossy().into_owned());
        self
    }
}

impl From<Result<PageView, SessionError>> for PageResponse {
    fn from(result: Result<PageView, SessionError>) -> Self {
        PageResponse::from_result(result)
    }
}

/// The outcome of an export, flattened for the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    /// Whether the file was written
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Where the sheet was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Whether the write re-encoded the pixels instead of copying bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reencoded: Option<bool>,
    /// The sheet now showing; present whenever the export was written,
    /// even if that next sheet itself failed to render
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_image: Option<Box<PageResponse>>,
}

impl From<Result<ExportRecord, SessionError>> for ExportResponse {
    fn from(result: Result<ExportRecord, SessionError>) -> Self {
        match result {
            Ok(record) => {
                let message = match &record.view {
                    Ok(view) => {
                        format!("sheet saved, now at {}/{}", view.index + 1, view.total)
                    }
                    Err(_) => "sheet saved".to_string(),
                };
                ExportResponse {
                    success: true,
                    message: Some(message),
                    path: Some(record.destination.to_string_lossy().into_owned()),
                    reencoded: Some(record.reencoded),
                    next_image: Some(Box::new(PageResponse::from_result(record.view))),
                }
            }
            Err(err) => ExportResponse {
                success: false,
                message: Some(err.to_string()),
                path: None,
                reencoded: None,
                next_image: None,
            },
        }
    }
}

/// Recognized text, flattened for the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextResponse {
    /// Whether recognition ran (an empty result is still a success)
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Result<String, SessionError>> for TextResponse {
    fn from(result: Result<String, SessionError>) -> Self {
        match result {
            Ok(text) => TextResponse {
                success: true,
                text: Some(text),
                message: None,
            },
            Err(err) => TextResponse {
                success: false,
                text: None,
                message: Some(err.to_string()),
            },
        }
    }
}
