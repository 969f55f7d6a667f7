//! Mapping between records and the cue sheet template

use chrono::NaiveDateTime;

use super::cell_ref::{CellRef, RangeRef};
use super::workbook::{CellValue, Workbook};
use crate::config::{EditorConfig, SheetLayout};
use crate::errors::{CueSheetError, Result};
use crate::models::{duration, FieldKey, FieldKind, Record, SheetHeader, SENTINEL};
use crate::utils::truncate_code_points;

/// Data columns, left to right. `None` is the computed duration column.
pub const COLUMNS: [Option<FieldKey>; 10] = [
    Some(FieldKey::Title),
    Some(FieldKey::Author),
    Some(FieldKey::Performer),
    Some(FieldKey::TcIn),
    Some(FieldKey::TcOut),
    None,
    Some(FieldKey::Modality),
    Some(FieldKey::MusicType),
    Some(FieldKey::LibraryCode),
    Some(FieldKey::LibraryName),
];

const COLUMN_COUNT: u32 = COLUMNS.len() as u32;

/// Field values read from one sheet row, before ids are assigned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportedRow {
    pub values: Vec<(FieldKey, String)>,
}

impl ImportedRow {
    pub fn get(&self, field: FieldKey) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| *key == field)
            .map(|(_, value)| value.as_str())
    }

    /// Fill an empty record with these values
    pub fn apply_to(&self, record: &mut Record, max_len: usize) {
        for (field, value) in &self.values {
            let value = match field.kind() {
                FieldKind::Text => truncate_code_points(value, max_len),
                FieldKind::Timecode if value.is_empty() => SENTINEL.to_string(),
                _ => value.clone(),
            };
            record.set_field(*field, value);
        }
        record.recompute_duration();
    }
}

/// `Cue-Sheet_<YYYY-MM-DD>_<HHmm>.xlsx`
pub fn export_file_name(prefix: &str, now: NaiveDateTime) -> String {
    format!("{}_{}.xlsx", prefix, now.format("%Y-%m-%d_%H%M"))
}

/// Episode numbers go out as numbers unless a leading zero would be lost
pub fn episode_cell_value(episode: &str) -> CellValue {
    let episode = episode.trim();
    let numeric = !episode.is_empty() && episode.chars().all(|c| c.is_ascii_digit());
    let zero_prefixed = episode.len() > 1 && episode.starts_with('0');

    if numeric && !zero_prefixed {
        if let Ok(n) = episode.parse::<u64>() {
            return CellValue::Number(n as f64);
        }
    }
    CellValue::text(episode)
}

fn data_range(layout: &SheetLayout, last_row: u32) -> RangeRef {
    RangeRef::new(
        CellRef::new(layout.data_start_row, 1),
        CellRef::new(last_row.max(layout.data_start_row), COLUMN_COUNT),
    )
}

fn record_row(record: &Record) -> Vec<CellValue> {
    COLUMNS
        .iter()
        .map(|column| match column {
            Some(field) => CellValue::text(record.field(*field)),
            None => CellValue::text(duration(&record.tc_in, &record.tc_out).unwrap_or_default()),
        })
        .collect()
}

/// Fill the template with the header and one row per record.
///
/// Rows past the template's styled area take the style of its last row;
/// leftover template rows are cleared.
pub fn export_records<W: Workbook + ?Sized>(
    workbook: &mut W,
    header: &SheetHeader,
    records: &[Record],
    config: &EditorConfig,
) -> Result<()> {
    let layout = &config.layout;
    let sheet = layout.sheet_name.as_str();
    if !workbook.has_sheet(sheet) {
        return Err(CueSheetError::ImportSheetNotFound(sheet.to_string()));
    }

    workbook.set_cell(
        sheet,
        CellRef::parse(&layout.program_title_cell)?,
        CellValue::text(header.program_title.trim()),
    )?;
    workbook.set_cell(
        sheet,
        CellRef::parse(&layout.episode_cell)?,
        episode_cell_value(&header.episode),
    )?;

    let first = layout.data_start_row;
    let last_needed = first + records.len().saturating_sub(1) as u32;
    for row in (layout.template_last_row + 1)..=last_needed {
        workbook.copy_row_style(sheet, layout.template_last_row, row, COLUMN_COUNT)?;
    }

    let mut rows: Vec<Vec<CellValue>> = records.iter().map(record_row).collect();
    let previous_last = workbook.last_used_row(sheet)?.max(layout.template_last_row);
    let clear_to = previous_last.max(last_needed);
    while (rows.len() as u32) < clear_to + 1 - first {
        rows.push(vec![CellValue::Empty; COLUMN_COUNT as usize]);
    }

    workbook.write_range(sheet, CellRef::new(first, 1), rows)?;
    log::info!("exported {} record(s) to sheet '{}'", records.len(), sheet);
    Ok(())
}

/// Read data rows from the template sheet, skipping fully blank rows
pub fn import_rows<W: Workbook + ?Sized>(workbook: &W, config: &EditorConfig) -> Result<Vec<ImportedRow>> {
    let layout = &config.layout;
    let sheet = layout.sheet_name.as_str();
    if !workbook.has_sheet(sheet) {
        return Err(CueSheetError::ImportSheetNotFound(sheet.to_string()));
    }

    let last_row = workbook.last_used_row(sheet)?;
    if last_row < layout.data_start_row {
        return Ok(Vec::new());
    }

    let values = workbook.read_range(sheet, data_range(layout, last_row))?;
    let rows: Vec<ImportedRow> = values
        .into_iter()
        .filter(|row| !row.iter().all(CellValue::is_blank))
        .map(|row| ImportedRow {
            values: COLUMNS
                .iter()
                .zip(row.iter())
                .filter_map(|(column, cell)| {
                    let field = (*column)?;
                    let value = match field.kind() {
                        FieldKind::Timecode => cell.as_timecode().unwrap_or_default(),
                        _ => cell.as_text(),
                    };
                    Some((field, value))
                })
                .collect(),
        })
        .collect();

    log::info!("read {} row(s) from sheet '{}'", rows.len(), sheet);
    Ok(rows)
}

/// Header cells of an imported workbook
pub fn import_header<W: Workbook + ?Sized>(workbook: &W, config: &EditorConfig) -> Result<SheetHeader> {
    let layout = &config.layout;
    let sheet = layout.sheet_name.as_str();
    let max = config.max_field_length;
    Ok(SheetHeader {
        program_title: truncate_code_points(
            &workbook.cell(sheet, CellRef::parse(&layout.program_title_cell)?)?.as_text(),
            max,
        ),
        episode: truncate_code_points(
            &workbook.cell(sheet, CellRef::parse(&layout.episode_cell)?)?.as_text(),
            max,
        ),
    })
}
