//! Spreadsheet import/export
//!
//! - `cell_ref`: A1 references
//! - `workbook`: the `Workbook` seam and `MemoryWorkbook`
//! - `adapter`: record <-> template mapping

pub mod adapter;
pub mod cell_ref;
pub mod workbook;

pub use adapter::{
    episode_cell_value, export_file_name, export_records, import_header, import_rows, ImportedRow,
    COLUMNS,
};
pub use cell_ref::{column_letters, CellRef, RangeRef};
pub use workbook::{CellValue, MemoryWorkbook, Workbook};
