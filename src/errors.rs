//! Error types for the cue sheet editor
//!
//! Validation kinds are recovered locally and rendered inline next to the
//! offending field. Import/export and API misuse kinds are surfaced to the
//! page as a visible message.

use thiserror::Error;

use crate::models::FieldKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CueSheetError {
    #[error("required field '{field}' is empty")]
    MissingRequiredField { field: FieldKey },

    #[error("'{value}' is not a valid HH:MM:SS timecode")]
    InvalidTimeFormat { value: String },

    #[error("out point {tc_out} must be later than in point {tc_in}")]
    TimeOrderingViolation { tc_in: String, tc_out: String },

    #[error("'{value}' is not an allowed value for '{field}'")]
    InvalidChoice { field: FieldKey, value: String },

    #[error("sheet '{0}' not found in workbook")]
    ImportSheetNotFound(String),

    #[error("spreadsheet library unavailable: {0}")]
    ImportLibraryUnavailable(String),

    #[error("no record with id {0}")]
    UnknownRecord(u32),

    #[error("reorder does not match current records: {0}")]
    ReorderMismatch(String),

    #[error("invalid cell reference '{0}'")]
    InvalidCellRef(String),

    #[error("no delete is awaiting confirmation")]
    NoPendingDelete,

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("no import is staged")]
    NoStagedImport,

    #[error("export blocked: {} row(s) have errors", .rows.len())]
    ExportBlocked { rows: Vec<u32> },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CueSheetError>;
