//! JavaScript-facing cue sheet editor
//!
//! The page creates one `CueSheetEditor`, forwards DOM events to it and
//! re-renders from `view()` after every call that returns. `free()` (generated
//! by wasm-bindgen) disposes of it.

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, field_from_js, js_error, serialize};
use super::types::{DragOverEvent, ExportResult};
use super::workbook::JsWorkbook;
use crate::config::EditorConfig;
use crate::editor::{EditorKey, KeyOutcome, TimeUnit};
use crate::models::HeaderField;
use crate::renderers;
use crate::session::{CueSheet, ImportMode};
use crate::{wasm_info, wasm_log, wasm_warn};

#[wasm_bindgen]
pub struct CueSheetEditor {
    sheet: CueSheet,
}

#[wasm_bindgen]
impl CueSheetEditor {
    /// Create an editor with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> CueSheetEditor {
        CueSheetEditor { sheet: CueSheet::default() }
    }

    /// Create an editor from a plain configuration object
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_js: JsValue) -> Result<CueSheetEditor, JsValue> {
        let config: EditorConfig = deserialize(config_js, "Invalid configuration")?;
        let config = config.validated().map_err(|e| js_error("Invalid configuration", e))?;
        Ok(CueSheetEditor { sheet: CueSheet::new(config) })
    }

    /// Reset to a single empty row
    pub fn dispose(&mut self) {
        wasm_log!("Disposing editor with {} row(s)", self.sheet.records().len());
        self.sheet.dispose();
    }

    /// Full view model for rendering
    pub fn view(&self) -> Result<JsValue, JsValue> {
        serialize(&renderers::render(&self.sheet), "View serialization error")
    }

    /// Records as plain objects
    pub fn records(&self) -> Result<JsValue, JsValue> {
        serialize(&self.sheet.records(), "Record serialization error")
    }

    // ------------------------------------------------------------------
    // Rows and fields
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = addRow)]
    pub fn add_row(&mut self) -> u32 {
        self.sheet.add_row()
    }

    #[wasm_bindgen(js_name = setField)]
    pub fn set_field(&mut self, id: u32, field: &str, value: &str) -> Result<(), JsValue> {
        let field = field_from_js(field)?;
        self.sheet
            .set_field(id, field, value)
            .map_err(|e| js_error("setField failed", e))
    }

    #[wasm_bindgen(js_name = setChecked)]
    pub fn set_checked(&mut self, id: u32, checked: bool) -> Result<(), JsValue> {
        self.sheet
            .set_checked(id, checked)
            .map_err(|e| js_error("setChecked failed", e))
    }

    #[wasm_bindgen(js_name = setAllChecked)]
    pub fn set_all_checked(&mut self, checked: bool) {
        self.sheet.set_all_checked(checked);
    }

    #[wasm_bindgen(js_name = setProgramTitle)]
    pub fn set_program_title(&mut self, value: &str) {
        self.sheet.set_header(HeaderField::ProgramTitle, value);
    }

    #[wasm_bindgen(js_name = setEpisode)]
    pub fn set_episode(&mut self, value: &str) {
        self.sheet.set_header(HeaderField::Episode, value);
    }

    /// Focus target for Tab inside the header ("programTitle" / "episode"),
    /// or undefined for default browser focus
    #[wasm_bindgen(js_name = headerTabTarget)]
    pub fn header_tab_target(&self, field: &str, shift: bool) -> Result<JsValue, JsValue> {
        let field: HeaderField = deserialize(JsValue::from_str(field), "Invalid header field")?;
        serialize(&field.tab_target(shift), "Header focus serialization error")
    }

    // ------------------------------------------------------------------
    // Inline editors
    // ------------------------------------------------------------------

    /// Open the overlay or time picker; false for select-box fields
    #[wasm_bindgen(js_name = openEditor)]
    pub fn open_editor(&mut self, id: u32, field: &str) -> Result<bool, JsValue> {
        let field = field_from_js(field)?;
        self.sheet
            .open_editor(id, field)
            .map_err(|e| js_error("openEditor failed", e))
    }

    #[wasm_bindgen(js_name = textInput)]
    pub fn text_input(&mut self, text: &str) {
        self.sheet.text_input(text);
    }

    /// Select "hh", "mm" or "ss" in the open time picker
    #[wasm_bindgen(js_name = selectTimeUnit)]
    pub fn select_time_unit(&mut self, unit: &str) -> Result<(), JsValue> {
        let unit: TimeUnit = deserialize(JsValue::from_str(unit), "Invalid time unit")?;
        self.sheet.select_time_unit(unit);
        Ok(())
    }

    /// Forward a `keydown`. Returns a `KeyOutcome`; the page calls
    /// `preventDefault()` unless the outcome is "ignored".
    #[wasm_bindgen(js_name = editorKey)]
    pub fn editor_key(&mut self, key: &str, shift: bool) -> Result<JsValue, JsValue> {
        let outcome = match EditorKey::from_dom(key, shift) {
            Some(key) => self
                .sheet
                .editor_key(key)
                .map_err(|e| js_error("editorKey failed", e))?,
            None => KeyOutcome::Ignored,
        };
        serialize(&outcome, "Key outcome serialization error")
    }

    #[wasm_bindgen(js_name = clickOutside)]
    pub fn click_outside(&mut self) -> Result<(), JsValue> {
        self.sheet
            .click_outside()
            .map_err(|e| js_error("commit failed", e))
    }

    #[wasm_bindgen(js_name = cancelEditor)]
    pub fn cancel_editor(&mut self) {
        self.sheet.cancel_editor();
    }

    // ------------------------------------------------------------------
    // Drag reorder
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = dragStart)]
    pub fn drag_start(&mut self, id: u32) -> Result<(), JsValue> {
        self.sheet
            .drag_start(id)
            .map_err(|e| js_error("dragStart failed", e))
    }

    /// Returns the placeholder position or undefined
    #[wasm_bindgen(js_name = dragOver)]
    pub fn drag_over(&mut self, event_js: JsValue) -> Result<JsValue, JsValue> {
        let event: DragOverEvent = deserialize(event_js, "Invalid dragover payload")?;
        let placeholder = self.sheet.drag_over(event.hovered_id, event.pointer_y, &event.rows);
        serialize(&placeholder, "Placeholder serialization error")
    }

    /// Returns the new index of the dropped row, or undefined
    #[wasm_bindgen(js_name = dropRow)]
    pub fn drop_row(&mut self) -> Result<Option<u32>, JsValue> {
        self.sheet
            .drop_row()
            .map(|index| index.map(|i| i as u32))
            .map_err(|e| js_error("drop failed", e))
    }

    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self) {
        self.sheet.drag_end();
    }

    #[wasm_bindgen(js_name = moveRecord)]
    pub fn move_record(&mut self, id: u32, to_index: u32) -> Result<u32, JsValue> {
        self.sheet
            .move_record(id, to_index as usize)
            .map(|i| i as u32)
            .map_err(|e| js_error("moveRecord failed", e))
    }

    // ------------------------------------------------------------------
    // Selection, delete, undo
    // ------------------------------------------------------------------

    /// `{kind: "nothingSelected"}` or `{kind: "confirmRequired", count}`
    #[wasm_bindgen(js_name = beginDelete)]
    pub fn begin_delete(&mut self) -> Result<JsValue, JsValue> {
        serialize(&self.sheet.begin_delete(), "Delete prompt serialization error")
    }

    #[wasm_bindgen(js_name = confirmDelete)]
    pub fn confirm_delete(&mut self) -> Result<JsValue, JsValue> {
        let report = self
            .sheet
            .confirm_delete()
            .map_err(|e| js_error("confirmDelete failed", e))?;
        serialize(&report, "Delete report serialization error")
    }

    #[wasm_bindgen(js_name = cancelDelete)]
    pub fn cancel_delete(&mut self) {
        self.sheet.cancel_delete();
    }

    pub fn undo(&mut self) -> Result<Vec<u32>, JsValue> {
        self.sheet.undo().map_err(|e| js_error("undo failed", e))
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.sheet.can_undo()
    }

    // ------------------------------------------------------------------
    // Validation, export, import
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = validateRow)]
    pub fn validate_row(&self, id: u32) -> Result<JsValue, JsValue> {
        let errors = self
            .sheet
            .validate_row(id)
            .map_err(|e| js_error("validateRow failed", e))?;
        serialize(&errors, "Validation serialization error")
    }

    /// Fill an XlsxPopulate template workbook. On success the page calls
    /// `outputAsync("blob")` and downloads it under `fileName`.
    #[wasm_bindgen(js_name = exportTo)]
    pub fn export_to(&mut self, workbook_js: JsValue) -> Result<JsValue, JsValue> {
        let mut workbook = JsWorkbook::new(workbook_js).map_err(|e| js_error("Export failed", e))?;
        let now = chrono::Local::now().naive_local();

        match self.sheet.export_to(&mut workbook, now) {
            Ok(file_name) => {
                wasm_info!("Export ready: {}", file_name);
                serialize(
                    &ExportResult { file_name, row_count: self.sheet.records().len() },
                    "Export result serialization error",
                )
            }
            Err(e) => {
                wasm_warn!("Export refused");
                Err(js_error("Export failed", e))
            }
        }
    }

    /// Read rows from a loaded XlsxPopulate workbook. Returns an `ImportPrompt`.
    #[wasm_bindgen(js_name = importFrom)]
    pub fn import_from(&mut self, workbook_js: JsValue) -> Result<JsValue, JsValue> {
        let workbook = JsWorkbook::new(workbook_js).map_err(|e| js_error("Import failed", e))?;
        let prompt = self
            .sheet
            .import_from(&workbook)
            .map_err(|e| js_error("Import failed", e))?;
        wasm_log!("Import staged: {:?}", prompt);
        serialize(&prompt, "Import prompt serialization error")
    }

    /// Finish a staged import with "replace" or "append"
    #[wasm_bindgen(js_name = applyImport)]
    pub fn apply_import(&mut self, mode: &str) -> Result<u32, JsValue> {
        let mode: ImportMode = deserialize(JsValue::from_str(mode), "Invalid import mode")?;
        self.sheet
            .apply_import(mode)
            .map(|n| n as u32)
            .map_err(|e| js_error("Import failed", e))
    }

    #[wasm_bindgen(js_name = discardImport)]
    pub fn discard_import(&mut self) {
        self.sheet.discard_import();
    }
}

impl Default for CueSheetEditor {
    fn default() -> Self {
        Self::new()
    }
}
