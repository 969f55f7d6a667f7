//! Record field keys
//!
//! The order of the variants is the tab order of a row.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CueSheetError;

/// How a field is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Free text through the overlay editor
    Text,
    /// Fixed vocabulary (select box)
    Choice,
    /// HH:MM:SS through the time editor
    Timecode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Title,
    Author,
    Performer,
    TcIn,
    TcOut,
    Modality,
    MusicType,
    LibraryCode,
    LibraryName,
}

impl FieldKey {
    pub const ALL: [FieldKey; 9] = [
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

    pub fn kind(self) -> FieldKind {
        match self {
            FieldKey::TcIn | FieldKey::TcOut => FieldKind::Timecode,
            FieldKey::Modality | FieldKey::MusicType => FieldKind::Choice,
            _ => FieldKind::Text,
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            FieldKey::Title | FieldKey::Author | FieldKey::Modality | FieldKey::MusicType
        )
    }

    /// Wire name used by the page (`tcIn`, `musicType`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Title => "title",
            FieldKey::Author => "author",
            FieldKey::Performer => "performer",
            FieldKey::TcIn => "tcIn",
            FieldKey::TcOut => "tcOut",
            FieldKey::Modality => "modality",
            FieldKey::MusicType => "musicType",
            FieldKey::LibraryCode => "libraryCode",
            FieldKey::LibraryName => "libraryName",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).unwrap_or(0)
    }

    /// Next field in tab order, `None` past the last one
    pub fn next(self) -> Option<FieldKey> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Previous field in tab order, `None` before the first one
    pub fn prev(self) -> Option<FieldKey> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = CueSheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CueSheetError::Config(format!("unknown field '{}'", s)))
    }
}
