// Validation gate and spreadsheet round trip through the in-memory workbook

use chrono::NaiveDate;
use cuesheet_wasm::spreadsheet::{CellRef, CellValue, MemoryWorkbook, Workbook};
use cuesheet_wasm::validation::ErrorKind;
use cuesheet_wasm::{CueSheet, CueSheetError, EditorConfig, FieldKey, HeaderField, ImportMode, ImportPrompt};

const FIELDS: [FieldKey; 9] = [
    FieldKey::Title,
    FieldKey::Author,
    FieldKey::Performer,
    FieldKey::TcIn,
    FieldKey::TcOut,
    FieldKey::Modality,
    FieldKey::MusicType,
    FieldKey::LibraryCode,
    FieldKey::LibraryName,
];

fn template(config: &EditorConfig) -> MemoryWorkbook {
    let mut wb = MemoryWorkbook::new();
    wb.add_sheet(&config.layout.sheet_name);
    wb
}

fn fill(sheet: &mut CueSheet, id: u32, n: u32) {
    sheet.set_field(id, FieldKey::Title, &format!("Cue {}", n)).unwrap();
    sheet.set_field(id, FieldKey::Author, "Composer").unwrap();
    sheet.set_field(id, FieldKey::Performer, "Ensemble").unwrap();
    sheet.set_field(id, FieldKey::TcIn, &format!("00:{:02}:00", n)).unwrap();
    sheet.set_field(id, FieldKey::TcOut, &format!("00:{:02}:30", n)).unwrap();
    sheet.set_field(id, FieldKey::Modality, "BI").unwrap();
    sheet.set_field(id, FieldKey::MusicType, "Library").unwrap();
    sheet.set_field(id, FieldKey::LibraryCode, &format!("LIB-{}", n)).unwrap();
    sheet.set_field(id, FieldKey::LibraryName, "Stock Music").unwrap();
}

fn filled_sheet(rows: u32) -> CueSheet {
    let mut sheet = CueSheet::default();
    let first = sheet.records()[0].id;
    fill(&mut sheet, first, 1);
    for n in 2..=rows {
        let id = sheet.add_row();
        fill(&mut sheet, id, n);
    }
    sheet
}

fn now() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 15).unwrap().and_hms_opt(14, 30, 0).unwrap()
}

#[test]
fn test_missing_title_then_equal_timecodes() {
    let mut sheet = CueSheet::default();
    let id = sheet.records()[0].id;
    fill(&mut sheet, id, 1);
    sheet.set_field(id, FieldKey::Title, "").unwrap();

    let errors = sheet.validate_row(id).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!((errors[0].field, errors[0].kind), (FieldKey::Title, ErrorKind::MissingRequiredField));

    sheet.set_field(id, FieldKey::Title, "Back").unwrap();
    sheet.set_field(id, FieldKey::TcOut, "00:01:00").unwrap();
    sheet.set_field(id, FieldKey::TcIn, "00:01:00").unwrap();
    let errors = sheet.validate_row(id).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!((errors[0].field, errors[0].kind), (FieldKey::TcOut, ErrorKind::TimeOrderingViolation));
}

#[test]
fn test_export_blocked_by_invalid_row() {
    let mut sheet = filled_sheet(2);
    let blank = sheet.add_row();
    let config = sheet.config().clone();
    let mut wb = template(&config);

    let err = sheet.export_to(&mut wb, now()).unwrap_err();
    assert_eq!(err, CueSheetError::ExportBlocked { rows: vec![blank] });
    assert!(sheet.is_armed());
    assert!(sheet.records().iter().all(|r| r.validation_touched));
    assert!(!sheet.visible_errors(blank).is_empty());

    // Nothing was written
    let title = wb.cell(&config.layout.sheet_name, CellRef::new(config.layout.data_start_row, 1)).unwrap();
    assert_eq!(title, CellValue::Empty);
}

#[test]
fn test_export_file_name_and_header() {
    let mut sheet = filled_sheet(1);
    sheet.set_header(HeaderField::ProgramTitle, "Late Show");
    sheet.set_header(HeaderField::Episode, "0042");
    let config = sheet.config().clone();
    let mut wb = template(&config);

    let name = sheet.export_to(&mut wb, now()).unwrap();
    assert_eq!(name, "Cue-Sheet_2026-10-15_1430.xlsx");

    let layout = &config.layout;
    let episode = wb
        .cell(&layout.sheet_name, CellRef::parse(&layout.episode_cell).unwrap())
        .unwrap();
    assert_eq!(episode, CellValue::Text("0042".into()));
}

#[test]
fn test_round_trip_preserves_fields() {
    let mut source = filled_sheet(25);
    source.set_header(HeaderField::ProgramTitle, "Documentary");
    source.set_header(HeaderField::Episode, "7");
    let mut wb = template(source.config());
    source.export_to(&mut wb, now()).unwrap();

    let mut target = CueSheet::default();
    let prompt = target.import_from(&wb).unwrap();
    assert_eq!(prompt, ImportPrompt::Applied { count: 25 });
    assert_eq!(target.header().program_title, "Documentary");
    assert_eq!(target.header().episode, "7");

    assert_eq!(target.records().len(), source.records().len());
    for (a, b) in source.records().iter().zip(target.records()) {
        for field in FIELDS {
            assert_eq!(a.field(field), b.field(field), "field {} differs", field);
        }
        assert_eq!(a.duration, b.duration);
    }
}

#[test]
fn test_import_into_filled_form_asks_for_mode() {
    let mut source = filled_sheet(2);
    let mut wb = template(source.config());
    source.export_to(&mut wb, now()).unwrap();

    let mut target = filled_sheet(3);
    assert_eq!(target.import_from(&wb).unwrap(), ImportPrompt::ChooseMode { incoming: 2 });
    assert_eq!(target.records().len(), 3);

    assert_eq!(target.apply_import(ImportMode::Append).unwrap(), 2);
    assert_eq!(target.records().len(), 5);
    let ids: Vec<u32> = target.records().iter().map(|r| r.id).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    assert_eq!(target.import_from(&wb).unwrap(), ImportPrompt::ChooseMode { incoming: 2 });
    target.apply_import(ImportMode::Replace).unwrap();
    assert_eq!(target.records().len(), 2);
    assert!(matches!(target.apply_import(ImportMode::Replace), Err(CueSheetError::NoStagedImport)));
}

#[test]
fn test_import_missing_sheet() {
    let mut sheet = CueSheet::default();
    let wb = MemoryWorkbook::new();
    assert_eq!(
        sheet.import_from(&wb),
        Err(CueSheetError::ImportSheetNotFound("Cue Sheet".into()))
    );
    assert_eq!(sheet.records().len(), 1);
}

#[test]
fn test_import_empty_sheet_is_noop() {
    let mut sheet = filled_sheet(1);
    let wb = template(sheet.config());
    assert_eq!(sheet.import_from(&wb).unwrap(), ImportPrompt::Empty);
    assert_eq!(sheet.records()[0].title, "Cue 1");
}

#[test]
fn test_round_trip_keeps_surrounding_whitespace() {
    let mut source = filled_sheet(1);
    let id = source.records()[0].id;
    source.set_field(id, FieldKey::Title, " Theme ").unwrap();
    source.set_field(id, FieldKey::Performer, "  Band").unwrap();
    source.set_field(id, FieldKey::LibraryName, "Stock Music ").unwrap();
    let mut wb = template(source.config());
    source.export_to(&mut wb, now()).unwrap();

    let mut target = CueSheet::default();
    target.import_from(&wb).unwrap();
    let (a, b) = (&source.records()[0], &target.records()[0]);
    assert_eq!(b.title, " Theme ");
    for field in FIELDS {
        assert_eq!(a.field(field), b.field(field), "field {} differs", field);
    }
}
