//! Per-row validation and the export gate

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::errors::CueSheetError;
use crate::models::{FieldKey, FieldKind, Record, Timecode};
use crate::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    MissingRequiredField,
    InvalidTimeFormat,
    TimeOrderingViolation,
    InvalidChoice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: FieldKey,
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    fn from_error(field: FieldKey, kind: ErrorKind, error: CueSheetError) -> Self {
        Self { field, kind, message: error.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowErrors {
    pub id: u32,
    pub errors: Vec<FieldError>,
}

/// Check one record. Errors come back in field order.
pub fn validate_record(record: &Record, config: &EditorConfig) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for field in FieldKey::ALL {
        let value = record.field(field).trim();

        if field.is_required() && value.is_empty() {
            errors.push(FieldError::from_error(
                field,
                ErrorKind::MissingRequiredField,
                CueSheetError::MissingRequiredField { field },
            ));
            continue;
        }

        match field.kind() {
            FieldKind::Choice if !value.is_empty() => {
                if !config.choices(field).iter().any(|choice| choice == value) {
                    errors.push(FieldError::from_error(
                        field,
                        ErrorKind::InvalidChoice,
                        CueSheetError::InvalidChoice { field, value: value.to_string() },
                    ));
                }
            }
            FieldKind::Timecode => {
                if let Err(e) = Timecode::parse(value) {
                    errors.push(FieldError::from_error(field, ErrorKind::InvalidTimeFormat, e));
                }
            }
            _ => {}
        }
    }

    if let (Ok(tc_in), Ok(tc_out)) = (Timecode::parse(&record.tc_in), Timecode::parse(&record.tc_out)) {
        if tc_out <= tc_in {
            errors.push(FieldError::from_error(
                FieldKey::TcOut,
                ErrorKind::TimeOrderingViolation,
                CueSheetError::TimeOrderingViolation {
                    tc_in: tc_in.to_string(),
                    tc_out: tc_out.to_string(),
                },
            ));
        }
    }

    errors
}

/// Errors the row should display right now
pub fn visible_errors(record: &Record, config: &EditorConfig) -> Vec<FieldError> {
    if record.validation_touched {
        validate_record(record, config)
    } else {
        Vec::new()
    }
}

/// Mark every row touched so errors display everywhere
pub fn arm_all(store: &mut RecordStore) {
    for record in store.iter_mut() {
        record.validation_touched = true;
    }
}

/// Validate every row; rows with errors come back in list order
pub fn validate_all(store: &RecordStore, config: &EditorConfig) -> Vec<RowErrors> {
    store
        .iter()
        .filter_map(|record| {
            let errors = validate_record(record, config);
            (!errors.is_empty()).then(|| RowErrors { id: record.id, errors })
        })
        .collect()
}

/// Arm validation and refuse export if any row has errors
pub fn check_export(store: &mut RecordStore, config: &EditorConfig) -> Result<(), CueSheetError> {
    arm_all(store);
    let failing = validate_all(store, config);
    if failing.is_empty() {
        Ok(())
    } else {
        log::warn!("export blocked by {} invalid row(s)", failing.len());
        Err(CueSheetError::ExportBlocked {
            rows: failing.into_iter().map(|row| row.id).collect(),
        })
    }
}
