//! `Workbook` over an XlsxPopulate workbook object
//!
//! The page loads the file with `XlsxPopulate.fromDataAsync` and hands the
//! resulting workbook in; after an export it calls `outputAsync("blob")` on
//! the same object. Every call goes through `js_sys::Reflect`.

use chrono::{NaiveDate, NaiveDateTime};
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::errors::{CueSheetError, Result};
use crate::spreadsheet::{CellRef, CellValue, RangeRef, Workbook};

/// Style properties carried over when the data area grows
const ROW_STYLE_KEYS: [&str; 10] = [
    "bold",
    "italic",
    "fontSize",
    "fontFamily",
    "fontColor",
    "horizontalAlignment",
    "verticalAlignment",
    "wrapText",
    "border",
    "fill",
];

pub struct JsWorkbook {
    inner: JsValue,
}

fn js_failure(context: &str, err: JsValue) -> CueSheetError {
    let detail = err.as_string().unwrap_or_else(|| format!("{:?}", err));
    CueSheetError::ImportLibraryUnavailable(format!("{}: {}", context, detail))
}

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue> {
    let func = Reflect::get(target, &JsValue::from_str(method)).map_err(|e| js_failure(method, e))?;
    let func: Function = func
        .dyn_into()
        .map_err(|_| CueSheetError::ImportLibraryUnavailable(format!("missing method '{}'", method)))?;

    let js_args = Array::new();
    for arg in args {
        js_args.push(arg);
    }
    Reflect::apply(&func, target, &js_args).map_err(|e| js_failure(method, e))
}

fn from_js(value: &JsValue) -> CellValue {
    if value.is_undefined() || value.is_null() {
        return CellValue::Empty;
    }
    if let Some(s) = value.as_string() {
        return CellValue::text(s);
    }
    if let Some(n) = value.as_f64() {
        return CellValue::Number(n);
    }
    if let Some(b) = value.as_bool() {
        return CellValue::Text(if b { "TRUE" } else { "FALSE" }.to_string());
    }
    if let Some(date) = value.dyn_ref::<js_sys::Date>() {
        let naive = NaiveDate::from_ymd_opt(
            date.get_full_year() as i32,
            date.get_month() + 1,
            date.get_date(),
        )
        .and_then(|d| d.and_hms_opt(date.get_hours(), date.get_minutes(), date.get_seconds()));
        if let Some(dt) = naive {
            return CellValue::DateTime(dt);
        }
    }
    CellValue::Empty
}

fn to_js(value: &CellValue) -> JsValue {
    match value {
        CellValue::Empty => JsValue::UNDEFINED,
        CellValue::Text(s) => JsValue::from_str(s),
        CellValue::Number(n) => JsValue::from_f64(*n),
        CellValue::DateTime(dt) => js_sys::Date::new(&JsValue::from_str(&iso(dt))).into(),
    }
}

fn iso(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

impl JsWorkbook {
    /// Wrap a workbook object; anything without a `sheet` method is rejected
    pub fn new(inner: JsValue) -> Result<Self> {
        let sheet_fn = Reflect::get(&inner, &JsValue::from_str("sheet"))
            .map_err(|e| js_failure("workbook", e))?;
        if !sheet_fn.is_function() {
            return Err(CueSheetError::ImportLibraryUnavailable(
                "value is not an XlsxPopulate workbook".to_string(),
            ));
        }
        Ok(Self { inner })
    }

    fn sheet(&self, name: &str) -> Result<JsValue> {
        let sheet = call(&self.inner, "sheet", &[JsValue::from_str(name)])?;
        if sheet.is_undefined() || sheet.is_null() {
            return Err(CueSheetError::ImportSheetNotFound(name.to_string()));
        }
        Ok(sheet)
    }

    fn js_cell(&self, sheet: &str, cell: CellRef) -> Result<JsValue> {
        call(&self.sheet(sheet)?, "cell", &[JsValue::from_str(&cell.to_string())])
    }
}

impl Workbook for JsWorkbook {
    fn has_sheet(&self, sheet: &str) -> bool {
        self.sheet(sheet).is_ok()
    }

    fn cell(&self, sheet: &str, cell: CellRef) -> Result<CellValue> {
        let value = call(&self.js_cell(sheet, cell)?, "value", &[])?;
        Ok(from_js(&value))
    }

    fn set_cell(&mut self, sheet: &str, cell: CellRef, value: CellValue) -> Result<()> {
        call(&self.js_cell(sheet, cell)?, "value", &[to_js(&value)])?;
        Ok(())
    }

    fn read_range(&self, sheet: &str, range: RangeRef) -> Result<Vec<Vec<CellValue>>> {
        let js_range = call(&self.sheet(sheet)?, "range", &[JsValue::from_str(&range.to_string())])?;
        let values = call(&js_range, "value", &[])?;
        let rows: Array = values
            .dyn_into()
            .map_err(|_| CueSheetError::ImportLibraryUnavailable("range value is not an array".into()))?;

        let cols = range.cols() as usize;
        Ok(rows
            .iter()
            .map(|row| {
                let mut cells: Vec<CellValue> = row
                    .dyn_ref::<Array>()
                    .map(|row| row.iter().map(|v| from_js(&v)).collect())
                    .unwrap_or_default();
                cells.resize(cols, CellValue::Empty);
                cells
            })
            .collect())
    }

    fn write_range(&mut self, sheet: &str, start: CellRef, values: Vec<Vec<CellValue>>) -> Result<()> {
        let Some(width) = values.iter().map(Vec::len).max().filter(|w| *w > 0) else {
            return Ok(());
        };
        let end = CellRef::new(start.row + values.len() as u32 - 1, start.col + width as u32 - 1);
        let range = RangeRef::new(start, end);

        let js_rows = Array::new();
        for row in &values {
            let js_row = Array::new();
            for col in 0..width {
                js_row.push(&row.get(col).map(to_js).unwrap_or(JsValue::UNDEFINED));
            }
            js_rows.push(&js_row);
        }

        let js_range = call(&self.sheet(sheet)?, "range", &[JsValue::from_str(&range.to_string())])?;
        call(&js_range, "value", &[js_rows.into()])?;
        Ok(())
    }

    fn copy_row_style(&mut self, sheet: &str, from_row: u32, to_row: u32, cols: u32) -> Result<()> {
        let keys = Array::new();
        for key in ROW_STYLE_KEYS {
            keys.push(&JsValue::from_str(key));
        }
        for col in 1..=cols {
            let source = self.js_cell(sheet, CellRef::new(from_row, col))?;
            let style = call(&source, "style", &[keys.clone().into()])?;
            let target = self.js_cell(sheet, CellRef::new(to_row, col))?;
            call(&target, "style", &[style])?;
        }
        Ok(())
    }

    fn last_used_row(&self, sheet: &str) -> Result<u32> {
        let used = call(&self.sheet(sheet)?, "usedRange", &[])?;
        if used.is_undefined() || used.is_null() {
            return Ok(0);
        }
        let end = call(&used, "endCell", &[])?;
        let row = call(&end, "rowNumber", &[])?;
        Ok(row.as_f64().map(|n| n as u32).unwrap_or(0))
    }
}
