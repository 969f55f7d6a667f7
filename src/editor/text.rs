//! Floating text overlay for free-text fields

use serde::{Deserialize, Serialize};

use crate::models::{FieldKey, Record};
use crate::utils::truncate_code_points;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub record_id: u32,
    pub field: FieldKey,
    pub draft: String,
}

impl TextEdit {
    pub fn open(record: &Record, field: FieldKey) -> Self {
        Self {
            record_id: record.id,
            field,
            draft: record.field(field).to_string(),
        }
    }

    /// Replace the draft; excess input past `max_len` code points is dropped
    pub fn input(&mut self, text: &str, max_len: usize) {
        self.draft = truncate_code_points(text, max_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_seeded_and_truncated() {
        let mut record = Record::empty(5);
        record.author = "Someone".into();

        let mut edit = TextEdit::open(&record, FieldKey::Author);
        assert_eq!(edit.draft, "Someone");

        edit.input(&"é".repeat(120), 100);
        assert_eq!(edit.draft.chars().count(), 100);
    }
}
