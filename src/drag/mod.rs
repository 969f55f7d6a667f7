//! Drag-and-drop row reordering
//!
//! The page reports pointer positions and row boxes; this module decides the
//! drop target and placeholder, and on drop moves the record in the store.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::store::RecordStore;

/// Vertical extent of a rendered row, in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowBox {
    pub id: u32,
    pub top: f64,
    pub height: f64,
}

impl RowBox {
    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    Before,
    After,
}

/// Where the placeholder sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    pub target_id: u32,
    pub placement: Placement,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    dragged: Option<u32>,
    placeholder: Option<Placeholder>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, id: u32) {
        self.dragged = Some(id);
        self.placeholder = None;
    }

    pub fn dragged(&self) -> Option<u32> {
        self.dragged
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        self.placeholder
    }

    /// Update the drop target for a pointer at `pointer_y`.
    ///
    /// `hovered` is the row directly under the pointer, if any. Otherwise the
    /// row whose centre is vertically closest wins.
    pub fn over(&mut self, hovered: Option<u32>, pointer_y: f64, rows: &[RowBox]) -> Option<Placeholder> {
        let dragged = self.dragged?;

        let target = hovered
            .and_then(|id| rows.iter().find(|row| row.id == id))
            .or_else(|| nearest_row(pointer_y, rows));

        self.placeholder = target.filter(|row| row.id != dragged).map(|row| Placeholder {
            target_id: row.id,
            placement: if pointer_y > row.center() {
                Placement::After
            } else {
                Placement::Before
            },
        });
        self.placeholder
    }

    /// Move the dragged record to the placeholder. Returns its new index, or
    /// `None` when there was nothing to drop.
    pub fn drop_on(&mut self, store: &mut RecordStore) -> Result<Option<usize>> {
        let dragged = self.dragged.take();
        let placeholder = self.placeholder.take();

        let (Some(id), Some(placeholder)) = (dragged, placeholder) else {
            return Ok(None);
        };

        let Some(from) = store.position(id) else {
            return Ok(None);
        };
        let Some(mut to) = store.position(placeholder.target_id) else {
            return Ok(None);
        };

        // The target index shifts left once the dragged row is taken out
        if from < to {
            to -= 1;
        }
        if placeholder.placement == Placement::After {
            to += 1;
        }

        store.move_record(id, to).map(Some)
    }

    /// Drag end or pointer leaving the list
    pub fn clear(&mut self) {
        self.dragged = None;
        self.placeholder = None;
    }
}

fn nearest_row(pointer_y: f64, rows: &[RowBox]) -> Option<&RowBox> {
    rows.iter().min_by(|a, b| {
        let da = (a.center() - pointer_y).abs();
        let db = (b.center() - pointer_y).abs();
        da.total_cmp(&db)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes(ids: &[u32]) -> Vec<RowBox> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| RowBox { id: *id, top: i as f64 * 40.0, height: 40.0 })
            .collect()
    }

    fn store_with(n: usize) -> RecordStore {
        let mut store = RecordStore::new();
        for _ in 1..n {
            store.push_empty();
        }
        store
    }

    #[test]
    fn test_placement_from_midpoint() {
        let rows = boxes(&[1, 2, 3]);
        let mut drag = DragState::new();
        drag.start(1);

        let p = drag.over(Some(2), 45.0, &rows).unwrap();
        assert_eq!(p, Placeholder { target_id: 2, placement: Placement::Before });

        let p = drag.over(Some(2), 70.0, &rows).unwrap();
        assert_eq!(p.placement, Placement::After);
    }

    #[test]
    fn test_nearest_row_fallback() {
        let rows = boxes(&[1, 2, 3]);
        let mut drag = DragState::new();
        drag.start(1);

        // Below the list: nearest centre is row 3
        let p = drag.over(None, 500.0, &rows).unwrap();
        assert_eq!(p, Placeholder { target_id: 3, placement: Placement::After });
    }

    #[test]
    fn test_hovering_dragged_row_has_no_placeholder() {
        let rows = boxes(&[1, 2]);
        let mut drag = DragState::new();
        drag.start(2);
        assert_eq!(drag.over(Some(2), 50.0, &rows), None);
    }

    #[test]
    fn test_drop_moves_record_to_front() {
        let mut store = store_with(4);
        let rows = boxes(&store.ids());
        let mut drag = DragState::new();

        drag.start(3);
        drag.over(Some(1), 5.0, &rows);
        assert_eq!(drag.drop_on(&mut store).unwrap(), Some(0));
        assert_eq!(store.ids(), vec![3, 1, 2, 4]);
        assert_eq!(drag.dragged(), None);
    }

    #[test]
    fn test_drop_after_later_row() {
        let mut store = store_with(4);
        let rows = boxes(&store.ids());
        let mut drag = DragState::new();

        drag.start(1);
        drag.over(Some(3), 115.0, &rows);
        drag.drop_on(&mut store).unwrap();
        assert_eq!(store.ids(), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_drop_without_target_is_noop() {
        let mut store = store_with(2);
        let mut drag = DragState::new();
        drag.start(1);
        assert_eq!(drag.drop_on(&mut store).unwrap(), None);
        assert_eq!(store.ids(), vec![1, 2]);
    }
}
