//! Workbook seam and an in-memory implementation
//!
//! The browser build talks to XlsxPopulate through `api::workbook::JsWorkbook`;
//! natively (and in tests) `MemoryWorkbook` stands in for it.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::cell_ref::{CellRef, RangeRef};
use crate::errors::{CueSheetError, Result};
use crate::models::Timecode;

/// 100 hours in days; anything below reads as an elapsed duration
const MAX_DURATION_DAYS: f64 = 100.0 / 24.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Plain string form; whole numbers print without a fraction. Text comes
    /// back exactly as stored.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Interpret as a timecode cell. Text must already be HH:MM:SS. Numbers
    /// are days: a `[h]:mm:ss` duration keeps its whole days while it fits
    /// in 99 hours, larger values are date serials and keep only the time
    /// of day. Date-times contribute their time of day.
    pub fn as_timecode(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            CellValue::Number(n) => {
                let days = if *n < MAX_DURATION_DAYS { *n } else { n.fract() };
                Timecode::from_day_fraction(days).map(|tc| tc.to_string())
            }
            CellValue::DateTime(dt) => Some(
                Timecode::new(dt.hour() as u8, dt.minute() as u8, dt.second() as u8).to_string(),
            ),
        }
    }
}

/// The spreadsheet operations the adapter needs
pub trait Workbook {
    fn has_sheet(&self, sheet: &str) -> bool;

    fn cell(&self, sheet: &str, cell: CellRef) -> Result<CellValue>;

    fn set_cell(&mut self, sheet: &str, cell: CellRef, value: CellValue) -> Result<()>;

    /// Row-major values of `range`; short rows are padded with `Empty`
    fn read_range(&self, sheet: &str, range: RangeRef) -> Result<Vec<Vec<CellValue>>>;

    fn write_range(&mut self, sheet: &str, start: CellRef, values: Vec<Vec<CellValue>>) -> Result<()>;

    /// Copy the style of `from_row` onto `to_row` for `cols` columns
    fn copy_row_style(&mut self, sheet: &str, from_row: u32, to_row: u32, cols: u32) -> Result<()>;

    /// Last row holding any value, 0 for an empty sheet
    fn last_used_row(&self, sheet: &str) -> Result<u32>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySheet {
    cells: BTreeMap<CellRef, CellValue>,
    /// Style names by cell; opaque to the adapter
    styles: HashMap<CellRef, String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryWorkbook {
    sheets: BTreeMap<String, MemorySheet>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, name: &str) -> &mut Self {
        self.sheets.entry(name.to_string()).or_default();
        self
    }

    pub fn set_style(&mut self, sheet: &str, cell: CellRef, style: &str) -> Result<()> {
        self.sheet_mut(sheet)?.styles.insert(cell, style.to_string());
        Ok(())
    }

    pub fn style(&self, sheet: &str, cell: CellRef) -> Option<&str> {
        self.sheets.get(sheet)?.styles.get(&cell).map(String::as_str)
    }

    fn sheet(&self, name: &str) -> Result<&MemorySheet> {
        self.sheets
            .get(name)
            .ok_or_else(|| CueSheetError::ImportSheetNotFound(name.to_string()))
    }

    fn sheet_mut(&mut self, name: &str) -> Result<&mut MemorySheet> {
        self.sheets
            .get_mut(name)
            .ok_or_else(|| CueSheetError::ImportSheetNotFound(name.to_string()))
    }
}

impl Workbook for MemoryWorkbook {
    fn has_sheet(&self, sheet: &str) -> bool {
        self.sheets.contains_key(sheet)
    }

    fn cell(&self, sheet: &str, cell: CellRef) -> Result<CellValue> {
        Ok(self.sheet(sheet)?.cells.get(&cell).cloned().unwrap_or_default())
    }

    fn set_cell(&mut self, sheet: &str, cell: CellRef, value: CellValue) -> Result<()> {
        let cells = &mut self.sheet_mut(sheet)?.cells;
        if value == CellValue::Empty {
            cells.remove(&cell);
        } else {
            cells.insert(cell, value);
        }
        Ok(())
    }

    fn read_range(&self, sheet: &str, range: RangeRef) -> Result<Vec<Vec<CellValue>>> {
        let sheet = self.sheet(sheet)?;
        Ok((range.start.row..=range.end.row)
            .map(|row| {
                (range.start.col..=range.end.col)
                    .map(|col| sheet.cells.get(&CellRef::new(row, col)).cloned().unwrap_or_default())
                    .collect()
            })
            .collect())
    }

    fn write_range(&mut self, sheet: &str, start: CellRef, values: Vec<Vec<CellValue>>) -> Result<()> {
        for (dr, row) in values.into_iter().enumerate() {
            for (dc, value) in row.into_iter().enumerate() {
                let cell = CellRef::new(start.row + dr as u32, start.col + dc as u32);
                self.set_cell(sheet, cell, value)?;
            }
        }
        Ok(())
    }

    fn copy_row_style(&mut self, sheet: &str, from_row: u32, to_row: u32, cols: u32) -> Result<()> {
        let sheet = self.sheet_mut(sheet)?;
        for col in 1..=cols {
            match sheet.styles.get(&CellRef::new(from_row, col)).cloned() {
                Some(style) => sheet.styles.insert(CellRef::new(to_row, col), style),
                None => sheet.styles.remove(&CellRef::new(to_row, col)),
            };
        }
        Ok(())
    }

    fn last_used_row(&self, sheet: &str) -> Result<u32> {
        Ok(self
            .sheet(sheet)?
            .cells
            .iter()
            .filter(|(_, value)| !value.is_blank())
            .map(|(cell, _)| cell.row)
            .max()
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_timecode_cells() {
        assert_eq!(CellValue::Number(0.5).as_timecode().as_deref(), Some("12:00:00"));
        assert_eq!(CellValue::Number(1.25).as_timecode().as_deref(), Some("30:00:00"));
        assert_eq!(CellValue::Number(46_310.75).as_timecode().as_deref(), Some("18:00:00"));
        assert_eq!(CellValue::text(" 00:01:02 ").as_timecode().as_deref(), Some("00:01:02"));
        let dt = NaiveDate::from_ymd_opt(1899, 12, 30)
            .unwrap()
            .and_hms_opt(0, 3, 15)
            .unwrap();
        assert_eq!(CellValue::DateTime(dt).as_timecode().as_deref(), Some("00:03:15"));
        assert_eq!(CellValue::Empty.as_timecode(), None);
    }

    #[test]
    fn test_number_as_text() {
        assert_eq!(CellValue::Number(12.0).as_text(), "12");
        assert_eq!(CellValue::Number(1.5).as_text(), "1.5");
        assert_eq!(CellValue::text(" Theme ").as_text(), " Theme ");
    }

    #[test]
    fn test_range_round_trip_and_last_row() {
        let mut wb = MemoryWorkbook::new();
        wb.add_sheet("S");
        wb.write_range(
            "S",
            CellRef::new(2, 1),
            vec![vec![CellValue::text("a"), CellValue::Empty], vec![CellValue::Number(3.0)]],
        )
        .unwrap();

        let values = wb
            .read_range("S", RangeRef::new(CellRef::new(2, 1), CellRef::new(3, 2)))
            .unwrap();
        assert_eq!(values[0][0], CellValue::text("a"));
        assert_eq!(values[1][1], CellValue::Empty);
        assert_eq!(wb.last_used_row("S").unwrap(), 3);
    }

    #[test]
    fn test_missing_sheet() {
        let wb = MemoryWorkbook::new();
        assert_eq!(
            wb.cell("Nope", CellRef::new(1, 1)),
            Err(CueSheetError::ImportSheetNotFound("Nope".into()))
        );
    }

    #[test]
    fn test_copy_row_style() {
        let mut wb = MemoryWorkbook::new();
        wb.add_sheet("S");
        wb.set_style("S", CellRef::new(5, 2), "bordered").unwrap();
        wb.copy_row_style("S", 5, 9, 3).unwrap();
        assert_eq!(wb.style("S", CellRef::new(9, 2)), Some("bordered"));
        assert_eq!(wb.style("S", CellRef::new(9, 1)), None);
    }
}
