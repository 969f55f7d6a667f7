//! Selection, bulk delete and single-level undo
//!
//! Deleting checked rows is a two-step operation: `begin` reports what would
//! happen, `confirm` performs it. The last delete can be undone once; a new
//! delete replaces the snapshot.

use serde::{Deserialize, Serialize};

use crate::errors::{CueSheetError, Result};
use crate::models::Record;
use crate::store::RecordStore;

/// Answer to a delete request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DeletePrompt {
    /// No row is checked; nothing changes
    NothingSelected,
    /// The page must ask the user before `confirm`
    ConfirmRequired { count: usize },
}

/// What a confirmed delete did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReport {
    pub removed_ids: Vec<u32>,
    /// Id of the empty row injected because the list would have emptied
    pub guard_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSnapshot {
    /// `(original_index, record)`, ascending by index
    pub entries: Vec<(usize, Record)>,
    pub guard_id: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionUndo {
    pending: bool,
    snapshot: Option<DeleteSnapshot>,
}

impl SelectionUndo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, store: &RecordStore) -> DeletePrompt {
        let count = store.iter().filter(|r| r.checked).count();
        if count == 0 {
            self.pending = false;
            return DeletePrompt::NothingSelected;
        }
        self.pending = true;
        DeletePrompt::ConfirmRequired { count }
    }

    pub fn cancel(&mut self) {
        self.pending = false;
    }

    /// Remove checked rows and keep a snapshot for `undo`
    pub fn confirm(&mut self, store: &mut RecordStore) -> Result<DeleteReport> {
        if !self.pending {
            return Err(CueSheetError::NoPendingDelete);
        }
        self.pending = false;

        let entries = store.remove_where(|r| r.checked);
        if entries.is_empty() {
            // Selection was cleared between begin and confirm
            return Ok(DeleteReport { removed_ids: Vec::new(), guard_id: None });
        }

        let guard_id = store.ensure_non_empty();
        let removed_ids = entries.iter().map(|(_, r)| r.id).collect();
        log::info!("deleted {} row(s), guard row: {:?}", entries.len(), guard_id);

        self.snapshot = Some(DeleteSnapshot { entries, guard_id });
        Ok(DeleteReport { removed_ids, guard_id })
    }

    pub fn can_undo(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Restore the last delete. Returns the restored ids in list order.
    pub fn undo(&mut self, store: &mut RecordStore) -> Result<Vec<u32>> {
        let snapshot = self.snapshot.take().ok_or(CueSheetError::NothingToUndo)?;

        if let Some(guard_id) = snapshot.guard_id {
            store.remove(guard_id);
        }

        // Ascending original indices: each earlier restore already shifted
        // later rows back into place.
        let mut max_id = 0;
        let mut restored = Vec::with_capacity(snapshot.entries.len());
        for (original_index, record) in snapshot.entries {
            max_id = max_id.max(record.id);
            restored.push(record.id);
            store.insert(record, original_index);
        }

        store.bump_next_id(max_id + 1);
        store.ensure_non_empty();
        log::info!("undo restored {} row(s)", restored.len());
        Ok(restored)
    }

    pub fn reset(&mut self) {
        self.pending = false;
        self.snapshot = None;
    }
}
