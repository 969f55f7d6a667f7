//! Cue sheet records
//!
//! One record is one music usage row. Records are only ever created by the
//! store, which owns the id counter.

use serde::{Deserialize, Serialize};

use super::field::FieldKey;
use super::timecode::{self, SENTINEL};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: u32,
    pub checked: bool,
    pub title: String,
    pub author: String,
    pub performer: String,
    pub library_code: String,
    pub library_name: String,
    pub modality: String,
    pub music_type: String,
    pub tc_in: String,
    pub tc_out: String,
    /// Derived from tc_in/tc_out, empty when not computable
    pub duration: String,
    /// Errors are only shown for touched rows
    pub validation_touched: bool,
}

impl Record {
    pub(crate) fn empty(id: u32) -> Self {
        Self {
            id,
            checked: false,
            title: String::new(),
            author: String::new(),
            performer: String::new(),
            library_code: String::new(),
            library_name: String::new(),
            modality: String::new(),
            music_type: String::new(),
            tc_in: SENTINEL.to_string(),
            tc_out: SENTINEL.to_string(),
            duration: String::new(),
            validation_touched: false,
        }
    }

    pub fn field(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Title => &self.title,
            FieldKey::Author => &self.author,
            FieldKey::Performer => &self.performer,
            FieldKey::TcIn => &self.tc_in,
            FieldKey::TcOut => &self.tc_out,
            FieldKey::Modality => &self.modality,
            FieldKey::MusicType => &self.music_type,
            FieldKey::LibraryCode => &self.library_code,
            FieldKey::LibraryName => &self.library_name,
        }
    }

    /// Raw write. Callers normalize the value first; timecode writes refresh
    /// the duration.
    pub(crate) fn set_field(&mut self, key: FieldKey, value: String) {
        let slot = match key {
            FieldKey::Title => &mut self.title,
            FieldKey::Author => &mut self.author,
            FieldKey::Performer => &mut self.performer,
            FieldKey::TcIn => &mut self.tc_in,
            FieldKey::TcOut => &mut self.tc_out,
            FieldKey::Modality => &mut self.modality,
            FieldKey::MusicType => &mut self.music_type,
            FieldKey::LibraryCode => &mut self.library_code,
            FieldKey::LibraryName => &mut self.library_name,
        };
        *slot = value;

        if matches!(key, FieldKey::TcIn | FieldKey::TcOut) {
            self.recompute_duration();
        }
    }

    pub fn recompute_duration(&mut self) {
        self.duration = timecode::duration(&self.tc_in, &self.tc_out).unwrap_or_default();
    }

    /// True when no field holds user data (timecodes at the sentinel count as empty)
    pub fn is_blank(&self) -> bool {
        FieldKey::ALL.iter().all(|&key| {
            let value = self.field(key).trim();
            match key {
                FieldKey::TcIn | FieldKey::TcOut => value.is_empty() || value == SENTINEL,
                _ => value.is_empty(),
            }
        })
    }
}
