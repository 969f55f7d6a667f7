// Record list behaviour across add / delete / undo / reorder sequences

use cuesheet_wasm::drag::RowBox;
use cuesheet_wasm::undo::DeletePrompt;
use cuesheet_wasm::CueSheet;

fn ids(sheet: &CueSheet) -> Vec<u32> {
    sheet.records().iter().map(|r| r.id).collect()
}

fn delete(sheet: &mut CueSheet, targets: &[u32]) {
    sheet.set_all_checked(false);
    for id in targets {
        sheet.set_checked(*id, true).unwrap();
    }
    match sheet.begin_delete() {
        DeletePrompt::ConfirmRequired { .. } => {
            sheet.confirm_delete().unwrap();
        }
        DeletePrompt::NothingSelected => {}
    }
}

#[test]
fn test_list_never_empties() {
    let mut sheet = CueSheet::default();
    let mut max_seen = 0;

    for round in 0..20u32 {
        for _ in 0..(round % 4) {
            sheet.add_row();
        }

        let current = ids(&sheet);
        let targets: Vec<u32> = current
            .iter()
            .copied()
            .filter(|id| (id + round) % 3 != 0 || round % 5 == 0)
            .collect();
        delete(&mut sheet, &targets);
        assert!(!sheet.records().is_empty(), "round {} emptied the list", round);

        if round % 2 == 0 && sheet.can_undo() {
            sheet.undo().unwrap();
            assert!(!sheet.records().is_empty());
        }

        // Newly created ids keep climbing
        let fresh = sheet.add_row();
        assert!(fresh > max_seen, "id {} reused (max seen {})", fresh, max_seen);
        max_seen = fresh;
    }
}

#[test]
fn test_nothing_selected_leaves_list_untouched() {
    let mut sheet = CueSheet::default();
    sheet.add_row();
    let before = ids(&sheet);

    assert_eq!(sheet.begin_delete(), DeletePrompt::NothingSelected);
    assert!(sheet.confirm_delete().is_err());
    assert_eq!(ids(&sheet), before);
}

#[test]
fn test_undo_restores_deleted_rows_in_order() {
    let mut sheet = CueSheet::default();
    for _ in 0..5 {
        sheet.add_row();
    }
    let before = ids(&sheet);

    delete(&mut sheet, &[before[1], before[2], before[4]]);
    assert_eq!(ids(&sheet), vec![before[0], before[3], before[5]]);

    let restored = sheet.undo().unwrap();
    assert_eq!(restored, vec![before[1], before[2], before[4]]);
    assert_eq!(ids(&sheet), before);
}

#[test]
fn test_cancelled_delete_keeps_rows() {
    let mut sheet = CueSheet::default();
    let id = sheet.records()[0].id;
    sheet.set_checked(id, true).unwrap();

    assert_eq!(sheet.begin_delete(), DeletePrompt::ConfirmRequired { count: 1 });
    sheet.cancel_delete();
    assert!(sheet.confirm_delete().is_err());
    assert_eq!(ids(&sheet), vec![id]);
}

#[test]
fn test_delete_everything_then_undo() {
    let mut sheet = CueSheet::default();
    sheet.add_row();
    let before = ids(&sheet);

    delete(&mut sheet, &before);
    assert_eq!(sheet.records().len(), 1);
    let guard = sheet.records()[0].id;
    assert!(!before.contains(&guard));

    sheet.undo().unwrap();
    assert_eq!(ids(&sheet), before);

    let next = sheet.add_row();
    assert!(next > guard);
}

#[test]
fn test_drag_record_three_to_front() {
    let mut sheet = CueSheet::default();
    for _ in 0..4 {
        sheet.add_row();
    }
    assert_eq!(ids(&sheet), vec![1, 2, 3, 4, 5]);

    let rows: Vec<RowBox> = ids(&sheet)
        .into_iter()
        .enumerate()
        .map(|(i, id)| RowBox { id, top: 100.0 + i as f64 * 32.0, height: 32.0 })
        .collect();

    sheet.drag_start(3).unwrap();
    let placeholder = sheet.drag_over(Some(1), 101.0, &rows).unwrap();
    assert_eq!(placeholder.target_id, 1);
    assert_eq!(sheet.drop_row().unwrap(), Some(0));

    assert_eq!(ids(&sheet), vec![3, 1, 2, 4, 5]);
    assert_eq!(sheet.drag().dragged(), None);
}

#[test]
fn test_drag_leave_cancels() {
    let mut sheet = CueSheet::default();
    sheet.add_row();
    let rows = vec![
        RowBox { id: 1, top: 0.0, height: 20.0 },
        RowBox { id: 2, top: 20.0, height: 20.0 },
    ];

    sheet.drag_start(1).unwrap();
    sheet.drag_over(Some(2), 35.0, &rows);
    sheet.drag_end();
    assert_eq!(sheet.drop_row().unwrap(), None);
    assert_eq!(ids(&sheet), vec![1, 2]);
}
