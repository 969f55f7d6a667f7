//! Record store
//!
//! Ordered sequence of records plus the monotonic id generator. List order is
//! authoritative; the rendered rows are always rebuilt from it.

use std::collections::HashSet;

use crate::errors::{CueSheetError, Result};
use crate::models::Record;

#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<Record>,
    next_id: u32,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// A store holding one empty record
    pub fn new() -> Self {
        let mut store = Self {
            records: Vec::new(),
            next_id: 1,
        };
        store.push_empty();
        store
    }

    /// Create an empty record with the next id. The record is not inserted.
    pub fn create_empty(&mut self) -> Record {
        let record = Record::empty(self.next_id);
        self.next_id += 1;
        record
    }

    /// "Add row" action
    pub fn push_empty(&mut self) -> u32 {
        let record = self.create_empty();
        let id = record.id;
        self.records.push(record);
        id
    }

    /// Insert at `at_index`, clamped to the current length
    pub fn insert(&mut self, record: Record, at_index: usize) -> usize {
        let index = at_index.min(self.records.len());
        self.records.insert(index, record);
        index
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Remove every record matching `predicate`.
    ///
    /// Returns `(original_index, record)` pairs in ascending index order.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<(usize, Record)>
    where
        F: FnMut(&Record) -> bool,
    {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.records.len());
        for (index, record) in self.records.drain(..).enumerate() {
            if predicate(&record) {
                removed.push((index, record));
            } else {
                kept.push(record);
            }
        }
        self.records = kept;
        removed
    }

    pub fn remove(&mut self, id: u32) -> Option<Record> {
        let index = self.position(id)?;
        Some(self.records.remove(index))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Replace the order wholesale. `new_order` must be a permutation of the
    /// current ids.
    pub fn reorder(&mut self, new_order: &[u32]) -> Result<()> {
        if new_order.len() != self.records.len() {
            return Err(CueSheetError::ReorderMismatch(format!(
                "expected {} ids, got {}",
                self.records.len(),
                new_order.len()
            )));
        }

        let mut seen = HashSet::with_capacity(new_order.len());
        for id in new_order {
            if !seen.insert(*id) {
                return Err(CueSheetError::ReorderMismatch(format!("duplicate id {}", id)));
            }
            if self.position(*id).is_none() {
                return Err(CueSheetError::ReorderMismatch(format!("unknown id {}", id)));
            }
        }

        let mut reordered = Vec::with_capacity(self.records.len());
        for id in new_order {
            if let Some(index) = self.records.iter().position(|r| r.id == *id) {
                reordered.push(self.records.swap_remove(index));
            }
        }
        self.records = reordered;
        Ok(())
    }

    /// Move a record so that it ends up at `to_index` (clamped)
    pub fn move_record(&mut self, id: u32, to_index: usize) -> Result<usize> {
        let from = self.position(id).ok_or(CueSheetError::UnknownRecord(id))?;
        let record = self.records.remove(from);
        let to = to_index.min(self.records.len());
        self.records.insert(to, record);
        log::debug!("moved record {} from {} to {}", id, from, to);
        Ok(to)
    }

    /// Inject a synthetic empty record if the store is empty
    pub fn ensure_non_empty(&mut self) -> Option<u32> {
        if self.records.is_empty() {
            Some(self.push_empty())
        } else {
            None
        }
    }

    /// Never lowers the counter
    pub fn bump_next_id(&mut self, at_least: u32) {
        self.next_id = self.next_id.max(at_least);
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn get(&self, id: u32) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Record> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    pub fn require_mut(&mut self, id: u32) -> Result<&mut Record> {
        self.get_mut(id).ok_or(CueSheetError::UnknownRecord(id))
    }

    pub fn position(&self, id: u32) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn ids(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.records.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when every record is blank
    pub fn has_no_data(&self) -> bool {
        self.records.iter().all(Record::is_blank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(n: usize) -> RecordStore {
        let mut store = RecordStore::new();
        for _ in 1..n {
            store.push_empty();
        }
        store
    }

    #[test]
    fn test_new_store_has_one_row() {
        let store = RecordStore::new();
        assert_eq!(store.len(), 1);
        assert_eq!(store.ids(), vec![1]);
        assert_eq!(store.next_id(), 2);
    }

    #[test]
    fn test_ids_never_reused() {
        let mut store = store_with(3);
        store.remove(3);
        assert_eq!(store.push_empty(), 4);
    }

    #[test]
    fn test_remove_where_reports_original_indices() {
        let mut store = store_with(5);
        let removed = store.remove_where(|r| r.id % 2 == 0);
        let indices: Vec<_> = removed.iter().map(|(i, r)| (*i, r.id)).collect();
        assert_eq!(indices, vec![(1, 2), (3, 4)]);
        assert_eq!(store.ids(), vec![1, 3, 5]);
    }

    #[test]
    fn test_move_record_to_front() {
        let mut store = store_with(5);
        store.move_record(3, 0).unwrap();
        assert_eq!(store.ids(), vec![3, 1, 2, 4, 5]);

        store.move_record(3, 99).unwrap();
        assert_eq!(store.ids(), vec![1, 2, 4, 5, 3]);

        assert_eq!(store.move_record(42, 0), Err(CueSheetError::UnknownRecord(42)));
    }

    #[test]
    fn test_reorder_requires_permutation() {
        let mut store = store_with(3);
        store.reorder(&[3, 1, 2]).unwrap();
        assert_eq!(store.ids(), vec![3, 1, 2]);

        assert!(store.reorder(&[1, 2]).is_err());
        assert!(store.reorder(&[1, 1, 2]).is_err());
        assert!(store.reorder(&[1, 2, 9]).is_err());
        assert_eq!(store.ids(), vec![3, 1, 2]);
    }

    #[test]
    fn test_ensure_non_empty() {
        let mut store = store_with(2);
        assert_eq!(store.ensure_non_empty(), None);
        store.clear();
        assert_eq!(store.ensure_non_empty(), Some(3));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_clamps_index() {
        let mut store = store_with(2);
        let record = store.create_empty();
        assert_eq!(store.insert(record, 10), 2);
        assert_eq!(store.ids(), vec![1, 2, 3]);
    }
}
