//! Cue sheet session
//!
//! `CueSheet` owns every piece of editor state: the record store, the header,
//! the inline editor, drag state, the delete/undo slot and any staged import.
//! UI callbacks receive it by `&mut` and re-render from it afterwards.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::drag::{DragState, Placeholder, RowBox};
use crate::editor::{EditorKey, EditorState, FocusTarget, KeyOutcome, TabStep, TextEdit, TimeEdit, TimeUnit};
use crate::errors::{CueSheetError, Result};
use crate::models::{FieldKey, FieldKind, HeaderField, Record, SheetHeader, Timecode, SENTINEL};
use crate::spreadsheet::{self, ImportedRow, Workbook};
use crate::store::RecordStore;
use crate::undo::{DeletePrompt, DeleteReport, SelectionUndo};
use crate::utils::truncate_code_points;
use crate::validation::{self, FieldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportMode {
    /// Drop the current rows
    Replace,
    /// Keep the current rows and add the imported ones after them
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ImportPrompt {
    /// The file had no data rows; nothing changed
    Empty,
    /// The form was empty, so the rows replaced it directly
    Applied { count: usize },
    /// The form holds data; the page must ask replace or append
    ChooseMode { incoming: usize },
}

#[derive(Debug, Clone)]
struct StagedImport {
    rows: Vec<ImportedRow>,
    header: Option<SheetHeader>,
}

#[derive(Debug, Clone)]
pub struct CueSheet {
    config: EditorConfig,
    store: RecordStore,
    header: SheetHeader,
    editor: EditorState,
    drag: DragState,
    selection: SelectionUndo,
    staged_import: Option<StagedImport>,
    armed: bool,
}

impl Default for CueSheet {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl CueSheet {
    pub fn new(config: EditorConfig) -> Self {
        log::debug!("cue sheet session created");
        Self {
            config,
            store: RecordStore::new(),
            header: SheetHeader::default(),
            editor: EditorState::Closed,
            drag: DragState::new(),
            selection: SelectionUndo::new(),
            staged_import: None,
            armed: false,
        }
    }

    /// Back to a single empty row; the configuration is kept
    pub fn dispose(&mut self) {
        *self = Self::new(self.config.clone());
        log::debug!("cue sheet session reset");
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    pub fn header(&self) -> &SheetHeader {
        &self.header
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn can_undo(&self) -> bool {
        self.selection.can_undo()
    }

    pub fn has_staged_import(&self) -> bool {
        self.staged_import.is_some()
    }

    // ------------------------------------------------------------------
    // Rows and fields
    // ------------------------------------------------------------------

    pub fn add_row(&mut self) -> u32 {
        let id = self.store.push_empty();
        if self.armed {
            if let Some(record) = self.store.get_mut(id) {
                record.validation_touched = true;
            }
        }
        id
    }

    /// Write a field value from a field editor.
    ///
    /// Text is truncated to the length limit, choices must come from the
    /// vocabulary, timecodes must be HH:MM:SS (empty means unset).
    pub fn set_field(&mut self, id: u32, field: FieldKey, value: &str) -> Result<()> {
        let value = match field.kind() {
            FieldKind::Text => truncate_code_points(value, self.config.max_field_length),
            FieldKind::Choice => {
                let value = value.trim();
                if !value.is_empty() && !self.config.choices(field).iter().any(|c| c == value) {
                    return Err(CueSheetError::InvalidChoice { field, value: value.to_string() });
                }
                value.to_string()
            }
            FieldKind::Timecode => {
                let value = value.trim();
                if value.is_empty() {
                    SENTINEL.to_string()
                } else {
                    Timecode::parse(value)?.to_string()
                }
            }
        };

        let record = self.store.require_mut(id)?;
        record.set_field(field, value);
        record.validation_touched = true;
        Ok(())
    }

    pub fn set_checked(&mut self, id: u32, checked: bool) -> Result<()> {
        self.store.require_mut(id)?.checked = checked;
        Ok(())
    }

    pub fn set_all_checked(&mut self, checked: bool) {
        for record in self.store.iter_mut() {
            record.checked = checked;
        }
    }

    pub fn set_header(&mut self, field: HeaderField, value: &str) {
        self.header.set(field, value, self.config.max_field_length);
    }

    // ------------------------------------------------------------------
    // Inline editors
    // ------------------------------------------------------------------

    /// Open the editor for a cell. Choice fields have no overlay and return
    /// `false`. Any editor already open is committed first.
    pub fn open_editor(&mut self, id: u32, field: FieldKey) -> Result<bool> {
        if self.editor.target() == Some((id, field)) {
            return Ok(true);
        }
        self.commit_editor()?;

        let record = self.store.get(id).ok_or(CueSheetError::UnknownRecord(id))?;
        self.editor = match field.kind() {
            FieldKind::Text => EditorState::EditingText(TextEdit::open(record, field)),
            FieldKind::Timecode => EditorState::EditingTime(TimeEdit::open(record, field)),
            FieldKind::Choice => return Ok(false),
        };
        log::debug!("editor open on record {} field {}", id, field);
        Ok(true)
    }

    /// Text typed into the overlay
    pub fn text_input(&mut self, text: &str) {
        if let EditorState::EditingText(edit) = &mut self.editor {
            edit.input(text, self.config.max_field_length);
        }
    }

    /// Click on one of the picker's unit segments
    pub fn select_time_unit(&mut self, unit: TimeUnit) {
        if let EditorState::EditingTime(edit) = &mut self.editor {
            edit.select_unit(unit);
        }
    }

    /// Feed a key to whichever editor is open
    pub fn editor_key(&mut self, key: EditorKey) -> Result<KeyOutcome> {
        match &mut self.editor {
            EditorState::Closed => Ok(KeyOutcome::Ignored),
            EditorState::EditingText(edit) => {
                let target = (edit.record_id, edit.field);
                match key {
                    EditorKey::Enter => {
                        self.commit_editor()?;
                        Ok(KeyOutcome::Committed { focus: None })
                    }
                    EditorKey::Escape => {
                        self.cancel_editor();
                        Ok(KeyOutcome::Cancelled)
                    }
                    EditorKey::Tab | EditorKey::ShiftTab => {
                        self.commit_editor()?;
                        let focus = self.adjacent_focus(target.0, target.1, key == EditorKey::ShiftTab);
                        Ok(KeyOutcome::Committed { focus })
                    }
                    _ => Ok(KeyOutcome::Ignored),
                }
            }
            EditorState::EditingTime(edit) => match key {
                EditorKey::Char(ch) => Ok(if edit.digit(ch) {
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::Ignored
                }),
                EditorKey::ArrowUp => {
                    edit.step(1);
                    Ok(KeyOutcome::Handled)
                }
                EditorKey::ArrowDown => {
                    edit.step(-1);
                    Ok(KeyOutcome::Handled)
                }
                EditorKey::Tab | EditorKey::ShiftTab => {
                    let target = (edit.record_id, edit.field);
                    match edit.tab(key == EditorKey::ShiftTab) {
                        TabStep::Unit(_) => Ok(KeyOutcome::Handled),
                        TabStep::Leave { backward } => {
                            self.commit_editor()?;
                            let focus = self.adjacent_focus(target.0, target.1, backward);
                            Ok(KeyOutcome::Committed { focus })
                        }
                    }
                }
                EditorKey::Enter => {
                    self.commit_editor()?;
                    Ok(KeyOutcome::Committed { focus: None })
                }
                EditorKey::Escape => {
                    self.cancel_editor();
                    Ok(KeyOutcome::Cancelled)
                }
            },
        }
    }

    /// Pointer down outside the open editor
    pub fn click_outside(&mut self) -> Result<()> {
        self.commit_editor()
    }

    /// Write the open editor's value back and close it
    pub fn commit_editor(&mut self) -> Result<()> {
        match std::mem::take(&mut self.editor) {
            EditorState::Closed => Ok(()),
            EditorState::EditingText(edit) => {
                // The row may have been deleted under the editor
                if self.store.get(edit.record_id).is_none() {
                    return Ok(());
                }
                self.set_field(edit.record_id, edit.field, &edit.draft)
            }
            EditorState::EditingTime(edit) => {
                if self.store.get(edit.record_id).is_none() {
                    return Ok(());
                }
                self.set_field(edit.record_id, edit.field, &edit.formatted())
            }
        }
    }

    /// Close without writing; the time picker restores the value it opened with
    pub fn cancel_editor(&mut self) {
        if let EditorState::EditingTime(edit) = std::mem::take(&mut self.editor) {
            if let Some(record) = self.store.get_mut(edit.record_id) {
                record.set_field(edit.field, edit.original);
            }
        }
    }

    /// Neighbouring cell in tab order, crossing into the next/previous row
    fn adjacent_focus(&self, id: u32, field: FieldKey, backward: bool) -> Option<FocusTarget> {
        let neighbour = if backward { field.prev() } else { field.next() };
        if let Some(field) = neighbour {
            return Some(FocusTarget { record_id: id, field });
        }

        let index = self.store.position(id)?;
        let (row, field) = if backward {
            (index.checked_sub(1)?, FieldKey::LibraryName)
        } else {
            (index + 1, FieldKey::Title)
        };
        self.store
            .records()
            .get(row)
            .map(|record| FocusTarget { record_id: record.id, field })
    }

    // ------------------------------------------------------------------
    // Drag reorder
    // ------------------------------------------------------------------

    pub fn drag_start(&mut self, id: u32) -> Result<()> {
        if self.store.get(id).is_none() {
            return Err(CueSheetError::UnknownRecord(id));
        }
        self.commit_editor()?;
        self.drag.start(id);
        Ok(())
    }

    pub fn drag_over(&mut self, hovered: Option<u32>, pointer_y: f64, rows: &[RowBox]) -> Option<Placeholder> {
        self.drag.over(hovered, pointer_y, rows)
    }

    pub fn drop_row(&mut self) -> Result<Option<usize>> {
        self.drag.drop_on(&mut self.store)
    }

    /// Drag end or pointer leaving the list
    pub fn drag_end(&mut self) {
        self.drag.clear();
    }

    /// Explicit move used by keyboard reordering and drop
    pub fn move_record(&mut self, id: u32, to_index: usize) -> Result<usize> {
        self.store.move_record(id, to_index)
    }

    /// Replace the order wholesale
    pub fn reorder(&mut self, ids: &[u32]) -> Result<()> {
        self.store.reorder(ids)
    }

    // ------------------------------------------------------------------
    // Selection, delete, undo
    // ------------------------------------------------------------------

    pub fn begin_delete(&mut self) -> DeletePrompt {
        self.selection.begin(&self.store)
    }

    pub fn confirm_delete(&mut self) -> Result<DeleteReport> {
        self.commit_editor()?;
        self.drag.clear();
        let report = self.selection.confirm(&mut self.store)?;
        if let (Some(guard), true) = (report.guard_id, self.armed) {
            if let Some(record) = self.store.get_mut(guard) {
                record.validation_touched = true;
            }
        }
        Ok(report)
    }

    pub fn cancel_delete(&mut self) {
        self.selection.cancel();
    }

    pub fn undo(&mut self) -> Result<Vec<u32>> {
        self.commit_editor()?;
        self.selection.undo(&mut self.store)
    }

    // ------------------------------------------------------------------
    // Validation and export
    // ------------------------------------------------------------------

    pub fn validate_row(&self, id: u32) -> Result<Vec<FieldError>> {
        let record = self.store.get(id).ok_or(CueSheetError::UnknownRecord(id))?;
        Ok(validation::validate_record(record, &self.config))
    }

    /// Errors a row currently displays
    pub fn visible_errors(&self, id: u32) -> Vec<FieldError> {
        self.store
            .get(id)
            .map(|record| validation::visible_errors(record, &self.config))
            .unwrap_or_default()
    }

    /// Arm validation on every row and report whether export may proceed
    pub fn check_export(&mut self) -> Result<()> {
        self.commit_editor()?;
        self.armed = true;
        validation::check_export(&mut self.store, &self.config)
    }

    /// Fill the template workbook. Returns the download file name.
    pub fn export_to<W: Workbook + ?Sized>(&mut self, workbook: &mut W, now: NaiveDateTime) -> Result<String> {
        self.check_export()?;
        spreadsheet::export_records(workbook, &self.header, self.store.records(), &self.config)?;
        Ok(spreadsheet::export_file_name(&self.config.file_name_prefix, now))
    }

    // ------------------------------------------------------------------
    // Import
    // ------------------------------------------------------------------

    /// Read a workbook and stage its rows
    pub fn import_from<W: Workbook + ?Sized>(&mut self, workbook: &W) -> Result<ImportPrompt> {
        let rows = spreadsheet::import_rows(workbook, &self.config)?;
        let header = spreadsheet::import_header(workbook, &self.config)?;
        Ok(self.stage_import(rows, Some(header)))
    }

    /// Stage rows; applies them at once when the form holds no data
    pub fn stage_import(&mut self, rows: Vec<ImportedRow>, header: Option<SheetHeader>) -> ImportPrompt {
        if rows.is_empty() {
            log::warn!("import contained no data rows");
            self.staged_import = None;
            return ImportPrompt::Empty;
        }

        let staged = StagedImport { rows, header };
        if self.store.has_no_data() {
            self.staged_import = None;
            let count = self.apply_staged(staged, ImportMode::Replace);
            ImportPrompt::Applied { count }
        } else {
            let incoming = staged.rows.len();
            self.staged_import = Some(staged);
            ImportPrompt::ChooseMode { incoming }
        }
    }

    pub fn apply_import(&mut self, mode: ImportMode) -> Result<usize> {
        let staged = self.staged_import.take().ok_or(CueSheetError::NoStagedImport)?;
        Ok(self.apply_staged(staged, mode))
    }

    fn apply_staged(&mut self, staged: StagedImport, mode: ImportMode) -> usize {
        self.editor = EditorState::Closed;
        self.drag.clear();

        if mode == ImportMode::Replace {
            self.store.clear();
            self.selection.reset();
            if let Some(header) = staged.header.filter(|h| *h != SheetHeader::default()) {
                self.header = header;
            }
        }

        let count = staged.rows.len();
        for row in &staged.rows {
            let mut record = self.store.create_empty();
            row.apply_to(&mut record, self.config.max_field_length);
            record.validation_touched = self.armed;
            self.store.push(record);
        }
        self.store.ensure_non_empty();

        log::info!("imported {} row(s) ({:?})", count, mode);
        count
    }

    pub fn discard_import(&mut self) {
        self.staged_import = None;
    }
}
