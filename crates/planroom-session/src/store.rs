//! Per-sheet name and number labels.
//!
//! Labels the user confirms (typed in or OCR'd) are remembered per folder
//! and filename, so revisiting a sheet pre-fills its fields. [`LabelStore`]
//! keeps the persistence mechanism pluggable; [`MemoryLabelStore`] is the
//! in-memory implementation used for tests and short-lived sessions.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The name and number a sheet will export under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLabel {
    /// Sheet name, e.g. "Floor Plan"
    pub name: String,
    /// Sheet number, e.g. "A-101"
    pub number: String,
}

impl SheetLabel {
    /// Build a label from its two parts.
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        SheetLabel {
            name: name.into(),
            number: number.into(),
        }
    }
}

/// Storage for sheet labels, keyed by folder and filename.
pub trait LabelStore {
    /// Look up the label for one sheet.
    fn get(&self, folder: &Path, filename: &str) -> Option<SheetLabel>;

    /// Store (or replace) the label for one sheet.
    fn set(&mut self, folder: &Path, filename: &str, label: SheetLabel);

    /// All labels recorded for a folder, keyed by filename.
    fn folder_labels(&self, folder: &Path) -> HashMap<String, SheetLabel>;

    /// Forget every label recorded for a folder.
    fn clear_folder(&mut self, folder: &Path);
}

/// A [`LabelStore`] backed by a plain nested map.
#[derive(Debug, Default)]
pub struct MemoryLabelStore {
    entries: HashMap<PathBuf, HashMap<String, SheetLabel>>,
}

impl MemoryLabelStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LabelStore for MemoryLabelStore {
    fn get(&self, folder: &Path, filename: &str) -> Option<SheetLabel> {
        self.entries.get(folder)?.get(filename).cloned()
    }

    fn set(&mut self, folder: &Path, filename: &str, label: SheetLabel) {
        self.entries
            .entry(folder.to_path_buf())
            .or_default()
            .insert(filename.to_string(), label);
    }

    fn folder_labels(&self, folder: &Path) -> HashMap<String, SheetLabel> {
        self.entries.get(folder).cloned().unwrap_or_default()
    }

    fn clear_folder(&mut self, folder: &Path) {
        self.entries.remove(folder);
    }
}
