//! Inline editing state machine
//!
//! At most one editor is open at a time: either the text overlay or the time
//! picker. The session owns the state and applies commits to the store.

pub mod text;
pub mod time;

use serde::{Deserialize, Serialize};

use crate::models::FieldKey;

pub use text::TextEdit;
pub use time::{TabStep, TimeEdit, TimeUnit};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum EditorState {
    #[default]
    Closed,
    EditingText(TextEdit),
    EditingTime(TimeEdit),
}

impl EditorState {
    pub fn is_open(&self) -> bool {
        !matches!(self, EditorState::Closed)
    }

    /// Record and field under edit
    pub fn target(&self) -> Option<(u32, FieldKey)> {
        match self {
            EditorState::Closed => None,
            EditorState::EditingText(edit) => Some((edit.record_id, edit.field)),
            EditorState::EditingTime(edit) => Some((edit.record_id, edit.field)),
        }
    }
}

/// Keys the editors react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase")]
pub enum EditorKey {
    Char(char),
    ArrowUp,
    ArrowDown,
    Tab,
    ShiftTab,
    Enter,
    Escape,
}

impl EditorKey {
    /// Map a DOM `KeyboardEvent.key` plus shift state
    pub fn from_dom(key: &str, shift: bool) -> Option<Self> {
        match key {
            "ArrowUp" => Some(EditorKey::ArrowUp),
            "ArrowDown" => Some(EditorKey::ArrowDown),
            "Tab" if shift => Some(EditorKey::ShiftTab),
            "Tab" => Some(EditorKey::Tab),
            "Enter" => Some(EditorKey::Enter),
            "Escape" | "Esc" => Some(EditorKey::Escape),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(EditorKey::Char(ch)),
                    _ => None,
                }
            }
        }
    }
}

/// Where focus should go after an editor closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusTarget {
    pub record_id: u32,
    pub field: FieldKey,
}

/// Result of feeding a key to the open editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum KeyOutcome {
    /// No editor open, or the key is not handled
    Ignored,
    /// The editor consumed the key and stays open
    Handled,
    Committed { focus: Option<FocusTarget> },
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(EditorKey::from_dom("Tab", true), Some(EditorKey::ShiftTab));
        assert_eq!(EditorKey::from_dom("Tab", false), Some(EditorKey::Tab));
        assert_eq!(EditorKey::from_dom("7", false), Some(EditorKey::Char('7')));
        assert_eq!(EditorKey::from_dom("Shift", true), None);
    }

    #[test]
    fn test_default_is_closed() {
        let state = EditorState::default();
        assert!(!state.is_open());
        assert_eq!(state.target(), None);
    }
}
