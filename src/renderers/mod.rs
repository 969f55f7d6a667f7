//! Row rendering
//!
//! Projects the session into a view model the page draws from. The projection
//! is rebuilt after every mutation; nothing here holds state.

use serde::{Deserialize, Serialize};

use crate::drag::Placeholder;
use crate::editor::EditorState;
use crate::models::{duration, Record, SheetHeader};
use crate::session::CueSheet;
use crate::validation::{visible_errors, FieldError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub id: u32,
    /// 1-based row number shown in the first column
    pub number: usize,
    pub checked: bool,
    pub title: String,
    pub author: String,
    pub performer: String,
    pub tc_in: String,
    pub tc_out: String,
    pub duration: String,
    pub modality: String,
    pub music_type: String,
    pub library_code: String,
    pub library_name: String,
    pub errors: Vec<FieldError>,
    pub dragging: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetView {
    pub header: SheetHeader,
    pub rows: Vec<RowView>,
    pub editor: EditorState,
    pub placeholder: Option<Placeholder>,
    pub all_checked: bool,
    pub can_undo: bool,
    pub armed: bool,
    pub modalities: Vec<String>,
    pub music_types: Vec<String>,
}

fn row_view(number: usize, record: &Record, sheet: &CueSheet) -> RowView {
    RowView {
        id: record.id,
        number,
        checked: record.checked,
        title: record.title.clone(),
        author: record.author.clone(),
        performer: record.performer.clone(),
        tc_in: record.tc_in.clone(),
        tc_out: record.tc_out.clone(),
        duration: duration(&record.tc_in, &record.tc_out).unwrap_or_default(),
        modality: record.modality.clone(),
        music_type: record.music_type.clone(),
        library_code: record.library_code.clone(),
        library_name: record.library_name.clone(),
        errors: visible_errors(record, sheet.config()),
        dragging: sheet.drag().dragged() == Some(record.id),
    }
}

pub fn render(sheet: &CueSheet) -> SheetView {
    let rows: Vec<RowView> = sheet
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| row_view(i + 1, record, sheet))
        .collect();

    SheetView {
        header: sheet.header().clone(),
        all_checked: !rows.is_empty() && rows.iter().all(|row| row.checked),
        rows,
        editor: sheet.editor().clone(),
        placeholder: sheet.drag().placeholder(),
        can_undo: sheet.can_undo(),
        armed: sheet.is_armed(),
        modalities: sheet.config().modalities.clone(),
        music_types: sheet.config().music_types.clone(),
    }
}
