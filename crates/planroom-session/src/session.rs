//! The browsing session.
//!
//! This module provides the stateful heart of the tool:
//! - opening a folder (or a single file) of scanned sheets
//! - circular navigation and quarter-turn rotation
//! - OCR over a selected region of the current sheet
//! - exporting the current sheet under its proper name
//!
//! # Architecture
//!
//! The session holds only light state: the sheet list, the active index,
//! the pending view rotation and the chosen export folder. Pixel data is
//! never kept between operations; every view is derived fresh from the
//! file. Operations follow a candidate pattern — compute the target index
//! and rotation, prove the sheet actually renders, and only then commit.
//! A sheet that fails to load therefore leaves the session exactly where
//! it was.

use std::path::{Path, PathBuf};

use planroom_core::export::{base_name, export_extension};
use planroom_core::transform::{crop_pixels, map_selection};
use planroom_core::{Rotation, SelectionRect};
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::export::{resolve_destination, write_export, ExportRecord};
use crate::listing::{list_folder, Sheet};
use crate::ocr::TextRecognizer;
use crate::preview::{load_rotated, render_page_view, PageView};
use crate::store::{LabelStore, SheetLabel};

/// A browsing session over one folder of sheets.
#[derive(Debug, Default)]
pub struct Session {
    sheets: Vec<Sheet>,
    index: usize,
    rotation: Rotation,
    folder: Option<PathBuf>,
    export_dir: Option<PathBuf>,
}

impl Session {
    /// Create a session with nothing open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a single file as a one-sheet session.
    ///
    /// The file's folder becomes the session folder. On failure the
    /// previous state is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::LoadFailure`] when the file cannot be read
    /// or decoded.
    pub fn open_file(&mut self, path: impl Into<PathBuf>) -> Result<PageView, SessionError> {
        let sheet = Sheet::from_path(path);
        let folder = sheet.path.parent().map(Path::to_path_buf);
        let view = derive(&sheet, Rotation::None, 0, 1)?;

        info!(path = %sheet.path.display(), "opened sheet");
        self.sheets = vec![sheet];
        self.index = 0;
        self.rotation = Rotation::None;
        self.folder = folder;
        Ok(view)
    }

    /// Open every sheet in a folder, sorted by path, showing the first.
    ///
    /// On failure the previous state is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::LoadFailure`] when the folder cannot be read
    /// or the first sheet fails to render, and
    /// [`SessionError::NoSheetsInFolder`] when nothing openable is inside.
    pub fn open_folder(&mut self, dir: &Path) -> Result<PageView, SessionError> {
        let sheets = list_folder(dir).map_err(|source| SessionError::LoadFailure {
            path: dir.to_path_buf(),
            source: source.into(),
        })?;
        if sheets.is_empty() {
            return Err(SessionError::NoSheetsInFolder {
                path: dir.to_path_buf(),
            });
        }

        let view = derive(&sheets[0], Rotation::None, 0, sheets.len())?;

        info!(folder = %dir.display(), count = sheets.len(), "opened folder");
        self.sheets = sheets;
        self.index = 0;
        self.rotation = Rotation::None;
        self.folder = Some(dir.to_path_buf());
        Ok(view)
    }

    /// Re-derive the current sheet without changing any state.
    pub fn refresh(&self) -> Result<PageView, SessionError> {
        let sheet = self.current_sheet().ok_or(SessionError::NoActiveSheet)?;
        derive(sheet, self.rotation, self.index, self.sheets.len())
    }

    /// Advance to the next sheet, wrapping at the end. Rotation resets.
    pub fn next(&mut self) -> Result<PageView, SessionError> {
        let total = self.require_sheets()?;
        self.activate((self.index + 1) % total, Rotation::None)
    }

    /// Step back to the previous sheet, wrapping at the start. Rotation resets.
    pub fn previous(&mut self) -> Result<PageView, SessionError> {
        let total = self.require_sheets()?;
        self.activate((self.index + total - 1) % total, Rotation::None)
    }

    /// Jump to a 1-based page number. Rotation resets.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::OutOfRange`] for page `0` or pages past the
    /// end; the current sheet and rotation stay as they were.
    pub fn goto(&mut self, page: usize) -> Result<PageView, SessionError> {
        let total = self.require_sheets()?;
        if page < 1 || page > total {
            return Err(SessionError::OutOfRange { given: page, total });
        }
        self.activate(page - 1, Rotation::None)
    }

    /// Turn the view a quarter turn clockwise.
    pub fn rotate_right(&mut self) -> Result<PageView, SessionError> {
        self.require_sheets()?;
        self.activate(self.index, self.rotation.rotated_right())
    }

    /// Turn the view a quarter turn counter-clockwise.
    pub fn rotate_left(&mut self) -> Result<PageView, SessionError> {
        self.require_sheets()?;
        self.activate(self.index, self.rotation.rotated_left())
    }

    /// OCR a region of the current sheet.
    ///
    /// `selection` is in display coordinates and is mapped back onto the
    /// full-resolution rotated sheet before cropping. Recognition is
    /// best-effort: a selection that maps to nothing, or a recognizer
    /// failure, comes back as an empty string rather than an error.
    ///
    /// # Errors
    ///
    /// Only loading the sheet itself can fail.
    pub fn recognize_region(
        &self,
        recognizer: &dyn TextRecognizer,
        selection: &SelectionRect,
    ) -> Result<String, SessionError> {
        let sheet = self.current_sheet().ok_or(SessionError::NoActiveSheet)?;
        let rotated =
            load_rotated(sheet, self.rotation).map_err(|source| SessionError::LoadFailure {
                path: sheet.path.clone(),
                source,
            })?;

        let rect = map_selection(selection, rotated.width, rotated.height);
        let region = crop_pixels(&rotated, rect);
        if region.is_empty() {
            return Ok(String::new());
        }

        match recognizer.recognize(&region) {
            Ok(text) => Ok(text),
            Err(err) => {
                warn!(sheet = %sheet.filename(), error = %err, "recognition failed");
                Ok(String::new())
            }
        }
    }

    /// Remember the label for the current sheet.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveSheet`] when nothing is open.
    pub fn remember_label(
        &self,
        store: &mut dyn LabelStore,
        label: SheetLabel,
    ) -> Result<(), SessionError> {
        let sheet = self.current_sheet().ok_or(SessionError::NoActiveSheet)?;
        let folder = self.folder.as_deref().ok_or(SessionError::NoActiveSheet)?;
        store.set(folder, &sheet.filename(), label);
        Ok(())
    }

    /// Recall the stored label for the current sheet, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveSheet`] when nothing is open.
    pub fn recall_label(
        &self,
        store: &dyn LabelStore,
    ) -> Result<Option<SheetLabel>, SessionError> {
        let sheet = self.current_sheet().ok_or(SessionError::NoActiveSheet)?;
        let folder = self.folder.as_deref().ok_or(SessionError::NoActiveSheet)?;
        Ok(store.get(folder, &sheet.filename()))
    }

    /// Export the current sheet into the export folder and advance.
    ///
    /// The destination name is `{name}-{number}` (either part may stand
    /// alone), keeping the source extension lowercased, with `(1)`, `(2)`,
    /// ... appended on collision. PDFs are copied byte-for-byte; rasters
    /// are copied too unless the view is rotated or the file carries a
    /// non-upright EXIF orientation, in which case the rotated pixels are
    /// re-encoded at maximum quality.
    ///
    /// After a successful write the rotation resets and the session
    /// advances to the next sheet (staying put when it is the only one).
    /// The returned record carries the view of the newly current sheet.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoActiveSheet`] when nothing is open,
    /// [`SessionError::ExportDirUnset`] before an export folder is chosen,
    /// [`SessionError::Validation`] for empty or reserved names, and
    /// [`SessionError::ExportFailure`] when writing fails. On any of these
    /// the session state is untouched.
    pub fn commit_export(
        &mut self,
        name: &str,
        number: &str,
    ) -> Result<ExportRecord, SessionError> {
        let total = self.require_sheets()?;
        let export_dir = self
            .export_dir
            .clone()
            .ok_or(SessionError::ExportDirUnset)?;
        let base = base_name(name, number)?;

        let sheet = self.sheets[self.index].clone();
        let extension = export_extension(&sheet.path);
        let destination = resolve_destination(&export_dir, &base, &extension);

        let reencoded = write_export(&sheet, self.rotation, &destination).map_err(|source| {
            SessionError::ExportFailure {
                path: destination.clone(),
                source,
            }
        })?;

        info!(
            sheet = %sheet.filename(),
            destination = %destination.display(),
            reencoded,
            "exported sheet"
        );

        // The write is committed; reset the view and move on. A failure to
        // render the next sheet is reported inside the record, not as an
        // operation failure.
        self.rotation = Rotation::None;
        if total > 1 {
            self.index = (self.index + 1) % total;
        }
        let view = self.refresh();
        if let Err(err) = &view {
            warn!(error = %err, "sheet after export failed to render");
        }

        Ok(ExportRecord {
            destination,
            reencoded,
            view,
        })
    }

    /// Choose the folder exports are written into.
    pub fn set_export_dir(&mut self, dir: impl Into<PathBuf>) {
        self.export_dir = Some(dir.into());
    }

    /// The chosen export folder, if any.
    pub fn export_dir(&self) -> Option<&Path> {
        self.export_dir.as_deref()
    }

    /// The open folder, if any.
    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    /// The sheet currently showing, if any.
    pub fn current_sheet(&self) -> Option<&Sheet> {
        self.sheets.get(self.index)
    }

    /// 0-based index of the current sheet.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of sheets open.
    pub fn total(&self) -> usize {
        self.sheets.len()
    }

    /// The current view rotation.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    fn require_sheets(&self) -> Result<usize, SessionError> {
        match self.sheets.len() {
            0 => Err(SessionError::NoActiveSheet),
            n => Ok(n),
        }
    }

    /// Derive a view for the candidate state and commit it on success.
    fn activate(&mut self, index: usize, rotation: Rotation) -> Result<PageView, SessionError> {
        let view = derive(&self.sheets[index], rotation, index, self.sheets.len())?;
        debug!(index, degrees = rotation.degrees(), "view derived");
        self.index = index;
        self.rotation = rotation;
        Ok(view)
    }
}

fn derive(
    sheet: &Sheet,
    rotation: Rotation,
    index: usize,
    total: usize,
) -> Result<PageView, SessionError> {
    render_page_view(sheet, rotation, index, total).map_err(|source| SessionError::LoadFailure {
        path: sheet.path.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::RecognizeError;
    use crate::store::MemoryLabelStore;
    use planroom_core::encode::{encode_jpeg, encode_raster};
    use planroom_core::{NameError, RgbBuffer};
    use std::cell::RefCell;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    /// An image whose pixel values encode their position.
    fn test_image(width: u32, height: u32) -> RgbBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x % 256) as u8);
                pixels.push((y % 256) as u8);
                pixels.push(128);
            }
        }
        RgbBuffer::new(width, height, pixels)
    }

    fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) {
        let bytes = encode_jpeg(&test_image(width, height), 90).unwrap();
        fs::write(dir.join(name), bytes).unwrap();
    }

    /// A session over freshly written 8x6 JPEG sheets.
    fn folder_session(names: &[&str]) -> (TempDir, Session) {
        let dir = tempdir().unwrap();
        for name in names {
            write_jpeg(dir.path(), name, 8, 6);
        }
        let mut session = Session::new();
        session.open_folder(dir.path()).unwrap();
        (dir, session)
    }

    struct Capturing {
        seen: RefCell<Option<RgbBuffer>>,
    }

    impl Capturing {
        fn new() -> Self {
            Capturing {
                seen: RefCell::new(None),
            }
        }
    }

    impl TextRecognizer for Capturing {
        fn recognize(&self, region: &RgbBuffer) -> Result<String, RecognizeError> {
            *self.seen.borrow_mut() = Some(region.clone());
            Ok("A-101".to_string())
        }
    }

    struct MustNotRun;

    impl TextRecognizer for MustNotRun {
        fn recognize(&self, _region: &RgbBuffer) -> Result<String, RecognizeError> {
            panic!("recognizer must not run for an empty selection");
        }
    }

    struct AlwaysFails;

    impl TextRecognizer for AlwaysFails {
        fn recognize(&self, _region: &RgbBuffer) -> Result<String, RecognizeError> {
            Err(RecognizeError::Timeout)
        }
    }

    fn full_frame(width: u32, height: u32) -> SelectionRect {
        SelectionRect {
            x: 0.0,
            y: 0.0,
            width: width as f64,
            height: height as f64,
            display_width: width as f64,
            display_height: height as f64,
        }
    }

    // ------------------------------------------------------------------
    // Opening

    #[test]
    fn test_open_folder_shows_first_sheet() {
        let (dir, session) = folder_session(&["b.jpg", "a.jpg", "c.jpg"]);

        let view = session.refresh().unwrap();
        assert_eq!(view.filename, "a.jpg");
        assert_eq!(view.index, 0);
        assert_eq!(view.total, 3);
        assert_eq!(session.folder(), Some(dir.path()));
    }

    #[test]
    fn test_open_empty_folder_keeps_state() {
        let (_dir, mut session) = folder_session(&["a.jpg"]);
        let empty = tempdir().unwrap();

        let err = session.open_folder(empty.path()).unwrap_err();
        assert!(matches!(err, SessionError::NoSheetsInFolder { .. }));

        // Still browsing the first folder
        assert_eq!(session.total(), 1);
        assert_eq!(session.refresh().unwrap().filename, "a.jpg");
    }

    #[test]
    fn test_open_missing_folder_is_load_failure() {
        let dir = tempdir().unwrap();
        let mut session = Session::new();

        let err = session.open_folder(&dir.path().join("gone")).unwrap_err();
        assert!(matches!(err, SessionError::LoadFailure { .. }));
        assert_eq!(session.total(), 0);
    }

    #[test]
    fn test_open_file_is_a_one_sheet_session() {
        let dir = tempdir().unwrap();
        write_jpeg(dir.path(), "solo.jpg", 8, 6);

        let mut session = Session::new();
        let view = session.open_file(dir.path().join("solo.jpg")).unwrap();

        assert_eq!(view.filename, "solo.jpg");
        assert_eq!(view.total, 1);
        assert_eq!(session.folder(), Some(dir.path()));
    }

    #[test]
    fn test_open_file_failure_keeps_previous_sheet() {
        let (dir, mut session) = folder_session(&["a.jpg"]);
        let bad = dir.path().join("bad.jpg");
        fs::write(&bad, b"not an image").unwrap();

        assert!(session.open_file(&bad).is_err());
        assert_eq!(session.refresh().unwrap().filename, "a.jpg");
    }

    // ------------------------------------------------------------------
    // Navigation

    #[test]
    fn test_next_and_previous_wrap_around() {
        let (_dir, mut session) = folder_session(&["a.jpg", "b.jpg", "c.jpg"]);

        assert_eq!(session.next().unwrap().filename, "b.jpg");
        assert_eq!(session.next().unwrap().filename, "c.jpg");
        assert_eq!(session.next().unwrap().filename, "a.jpg");

        assert_eq!(session.previous().unwrap().filename, "c.jpg");
        assert_eq!(session.previous().unwrap().filename, "b.jpg");
    }

    #[test]
    fn test_navigation_resets_rotation() {
        let (_dir, mut session) = folder_session(&["a.jpg", "b.jpg"]);

        session.rotate_right().unwrap();
        assert_eq!(session.rotation(), Rotation::Cw90);

        session.next().unwrap();
        assert_eq!(session.rotation(), Rotation::None);
    }

    #[test]
    fn test_goto_is_one_based() {
        let (_dir, mut session) = folder_session(&["a.jpg", "b.jpg", "c.jpg"]);

        let view = session.goto(2).unwrap();
        assert_eq!(view.filename, "b.jpg");
        assert_eq!(view.index, 1);

        assert_eq!(session.goto(1).unwrap().filename, "a.jpg");
    }

    #[test]
    fn test_goto_out_of_range_leaves_state_alone() {
        let (_dir, mut session) = folder_session(&["a.jpg", "b.jpg", "c.jpg"]);
        session.goto(2).unwrap();
        session.rotate_right().unwrap();

        let err = session.goto(9).unwrap_err();
        assert!(matches!(
            err,
            SessionError::OutOfRange { given: 9, total: 3 }
        ));

        // Neither the page nor the rotation moved
        assert_eq!(session.index(), 1);
        assert_eq!(session.rotation(), Rotation::Cw90);
    }

    #[test]
    fn test_goto_zero_is_out_of_range() {
        let (_dir, mut session) = folder_session(&["a.jpg"]);
        assert!(matches!(
            session.goto(0).unwrap_err(),
            SessionError::OutOfRange { given: 0, total: 1 }
        ));
    }

    // ------------------------------------------------------------------
    // Rotation

    #[test]
    fn test_rotate_right_swaps_view_dimensions() {
        let (_dir, mut session) = folder_session(&["a.jpg"]);

        let view = session.rotate_right().unwrap();
        assert_eq!((view.display_width, view.display_height), (6, 8));
        assert_eq!((view.original_width, view.original_height), (6, 8));
        assert_eq!(session.rotation(), Rotation::Cw90);
    }

    #[test]
    fn test_four_right_turns_come_back_upright() {
        let (_dir, mut session) = folder_session(&["a.jpg"]);

        for _ in 0..4 {
            session.rotate_right().unwrap();
        }

        assert_eq!(session.rotation(), Rotation::None);
        let view = session.refresh().unwrap();
        assert_eq!((view.display_width, view.display_height), (8, 6));
    }

    #[test]
    fn test_rotate_left_undoes_rotate_right() {
        let (_dir, mut session) = folder_session(&["a.jpg"]);

        session.rotate_right().unwrap();
        session.rotate_left().unwrap();
        assert_eq!(session.rotation(), Rotation::None);
    }

    #[test]
    fn test_operations_on_empty_session() {
        let mut session = Session::new();

        assert!(matches!(
            session.next().unwrap_err(),
            SessionError::NoActiveSheet
        ));
        assert!(matches!(
            session.previous().unwrap_err(),
            SessionError::NoActiveSheet
        ));
        assert!(matches!(
            session.goto(1).unwrap_err(),
            SessionError::NoActiveSheet
        ));
        assert!(matches!(
            session.rotate_right().unwrap_err(),
            SessionError::NoActiveSheet
        ));
        assert!(matches!(
            session.refresh().unwrap_err(),
            SessionError::NoActiveSheet
        ));
        assert!(matches!(
            session.commit_export("A", "1").unwrap_err(),
            SessionError::NoActiveSheet
        ));
    }

    // ------------------------------------------------------------------
    // Region OCR

    #[test]
    fn test_recognize_region_maps_display_coordinates() {
        let dir = tempdir().unwrap();
        // PNG keeps pixel values exact, so positions can be verified
        let image = test_image(8, 6);
        let bytes = encode_raster(&image, image::ImageFormat::Png).unwrap();
        fs::write(dir.path().join("a.png"), bytes).unwrap();

        let mut session = Session::new();
        session.open_folder(dir.path()).unwrap();

        // The caller saw the sheet at half size
        let selection = SelectionRect {
            x: 1.0,
            y: 1.0,
            width: 2.0,
            height: 1.0,
            display_width: 4.0,
            display_height: 3.0,
        };

        let recognizer = Capturing::new();
        let text = session.recognize_region(&recognizer, &selection).unwrap();
        assert_eq!(text, "A-101");

        let region = recognizer.seen.borrow().clone().unwrap();
        assert_eq!((region.width, region.height), (4, 2));
        // Top-left of the region is source pixel (2, 2)
        assert_eq!(&region.pixels[..3], &[2, 2, 128]);
    }

    #[test]
    fn test_recognize_region_sees_rotated_frame() {
        let (_dir, mut session) = folder_session(&["a.jpg"]);
        session.rotate_right().unwrap();

        let recognizer = Capturing::new();
        session
            .recognize_region(&recognizer, &full_frame(6, 8))
            .unwrap();

        let region = recognizer.seen.borrow().clone().unwrap();
        assert_eq!((region.width, region.height), (6, 8));
    }

    #[test]
    fn test_recognize_empty_selection_skips_recognizer() {
        let (_dir, session) = folder_session(&["a.jpg"]);

        let selection = SelectionRect {
            x: 2.0,
            y: 2.0,
            width: 0.0,
            height: 3.0,
            display_width: 8.0,
            display_height: 6.0,
        };

        let text = session.recognize_region(&MustNotRun, &selection).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_recognizer_failure_becomes_empty_text() {
        let (_dir, session) = folder_session(&["a.jpg"]);

        let text = session
            .recognize_region(&AlwaysFails, &full_frame(8, 6))
            .unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_recognize_region_without_sheet() {
        let session = Session::new();
        assert!(matches!(
            session
                .recognize_region(&MustNotRun, &full_frame(8, 6))
                .unwrap_err(),
            SessionError::NoActiveSheet
        ));
    }

    // ------------------------------------------------------------------
    // Labels

    #[test]
    fn test_remember_and_recall_label() {
        let (_dir, mut session) = folder_session(&["a.jpg", "b.jpg"]);
        let mut store = MemoryLabelStore::new();

        session
            .remember_label(&mut store, SheetLabel::new("Floor Plan", "A-101"))
            .unwrap();
        assert_eq!(
            session.recall_label(&store).unwrap(),
            Some(SheetLabel::new("Floor Plan", "A-101"))
        );

        // The label belongs to a.jpg, not to the sheet after it
        session.next().unwrap();
        assert_eq!(session.recall_label(&store).unwrap(), None);
    }

    #[test]
    fn test_label_ops_without_sheet() {
        let session = Session::new();
        let mut store = MemoryLabelStore::new();

        assert!(session
            .remember_label(&mut store, SheetLabel::default())
            .is_err());
        assert!(session.recall_label(&store).is_err());
    }

    // ------------------------------------------------------------------
    // Export

    fn exporting_session(names: &[&str]) -> (TempDir, TempDir, Session) {
        let (dir, mut session) = folder_session(names);
        let out = tempdir().unwrap();
        session.set_export_dir(out.path());
        (dir, out, session)
    }

    #[test]
    fn test_export_writes_named_copy_and_advances() {
        let (dir, out, mut session) = exporting_session(&["a.jpg", "b.jpg"]);

        let record = session.commit_export("Floor Plan", "A-101").unwrap();

        assert_eq!(record.destination, out.path().join("Floor Plan-A-101.jpg"));
        assert!(!record.reencoded);
        // Byte-for-byte identical to the source
        assert_eq!(
            fs::read(&record.destination).unwrap(),
            fs::read(dir.path().join("a.jpg")).unwrap()
        );

        // The session moved on to the next sheet
        let view = record.view.unwrap();
        assert_eq!(view.filename, "b.jpg");
        assert_eq!(session.index(), 1);
    }

    #[test]
    fn test_export_single_sheet_stays_put() {
        let (_dir, _out, mut session) = exporting_session(&["a.jpg"]);

        let record = session.commit_export("A", "1").unwrap();

        assert_eq!(record.view.unwrap().filename, "a.jpg");
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_export_name_parts_may_stand_alone() {
        let (_dir, out, mut session) = exporting_session(&["a.jpg"]);

        let record = session.commit_export("", "A-101").unwrap();
        assert_eq!(record.destination, out.path().join("A-101.jpg"));

        let record = session.commit_export("Cover Sheet", "").unwrap();
        assert_eq!(record.destination, out.path().join("Cover Sheet.jpg"));
    }

    #[test]
    fn test_export_collisions_get_numbered_suffixes() {
        let (_dir, out, mut session) = exporting_session(&["a.jpg"]);

        session.commit_export("A", "1").unwrap();
        session.commit_export("A", "1").unwrap();
        let record = session.commit_export("A", "1").unwrap();

        assert!(out.path().join("A-1.jpg").exists());
        assert!(out.path().join("A-1(1).jpg").exists());
        assert_eq!(record.destination, out.path().join("A-1(2).jpg"));
    }

    #[test]
    fn test_export_rotated_sheet_reencodes_and_resets() {
        let (_dir, _out, mut session) = exporting_session(&["a.jpg"]);
        session.rotate_right().unwrap();

        let record = session.commit_export("A", "1").unwrap();

        assert!(record.reencoded);
        assert_eq!(session.rotation(), Rotation::None);

        let written =
            planroom_core::decode::decode_raster(&fs::read(&record.destination).unwrap()).unwrap();
        assert_eq!((written.width, written.height), (6, 8));
        // The fresh view is upright again
        let view = record.view.unwrap();
        assert_eq!((view.display_width, view.display_height), (8, 6));
    }

    #[test]
    fn test_export_keeps_extension_lowercased() {
        let dir = tempdir().unwrap();
        write_jpeg(dir.path(), "SCAN.JPG", 8, 6);
        let out = tempdir().unwrap();

        let mut session = Session::new();
        session.open_folder(dir.path()).unwrap();
        session.set_export_dir(out.path());

        let record = session.commit_export("A", "1").unwrap();
        assert_eq!(record.destination, out.path().join("A-1.jpg"));
    }

    #[test]
    fn test_export_requires_export_dir_first() {
        let (_dir, mut session) = folder_session(&["a.jpg"]);
        session.rotate_right().unwrap();

        // The folder check comes before name validation, so even a bad
        // name reports the missing folder
        let err = session.commit_export("bad:name", "").unwrap_err();
        assert!(matches!(err, SessionError::ExportDirUnset));
        assert_eq!(session.rotation(), Rotation::Cw90);
    }

    #[test]
    fn test_export_rejects_bad_names() {
        let (_dir, _out, mut session) = exporting_session(&["a.jpg"]);

        let err = session.commit_export("bad:name", "").unwrap_err();
        match err {
            SessionError::Validation(NameError::Reserved { found }) => {
                assert_eq!(found, ":");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = session.commit_export("", "").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Validation(NameError::Empty)
        ));

        // Nothing was exported, nothing moved
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_export_write_failure_keeps_state() {
        let (dir, mut session) = folder_session(&["a.jpg", "b.jpg"]);
        // Point the export folder at a regular file so writing must fail
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        session.set_export_dir(&blocker);
        session.rotate_right().unwrap();

        let err = session.commit_export("A", "1").unwrap_err();
        assert!(matches!(err, SessionError::ExportFailure { .. }));

        assert_eq!(session.index(), 0);
        assert_eq!(session.rotation(), Rotation::Cw90);
    }

    #[test]
    fn test_export_reports_broken_next_sheet_in_record() {
        let dir = tempdir().unwrap();
        write_jpeg(dir.path(), "a.jpg", 8, 6);
        fs::write(dir.path().join("b.jpg"), b"not an image").unwrap();
        let out = tempdir().unwrap();

        let mut session = Session::new();
        session.open_folder(dir.path()).unwrap();
        session.set_export_dir(out.path());

        let record = session.commit_export("A", "1").unwrap();

        // The export itself succeeded and the session advanced, but the
        // sheet now showing cannot render
        assert!(out.path().join("A-1.jpg").exists());
        assert!(record.view.is_err());
        assert_eq!(session.index(), 1);
    }
}
