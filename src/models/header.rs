//! Sheet header (program title and episode)

use serde::{Deserialize, Serialize};

use crate::utils::truncate_code_points;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeaderField {
    ProgramTitle,
    Episode,
}

impl HeaderField {
    /// Focus target for Tab / Shift+Tab.
    ///
    /// The two inputs form a closed loop: Shift+Tab on the program title and
    /// Tab on the episode jump to the other input. `None` means the browser's
    /// default focus movement applies.
    pub fn tab_target(self, shift: bool) -> Option<HeaderField> {
        match (self, shift) {
            (HeaderField::ProgramTitle, true) => Some(HeaderField::Episode),
            (HeaderField::Episode, false) => Some(HeaderField::ProgramTitle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetHeader {
    pub program_title: String,
    pub episode: String,
}

impl SheetHeader {
    pub fn set(&mut self, field: HeaderField, value: &str, max_len: usize) {
        let value = truncate_code_points(value, max_len);
        match field {
            HeaderField::ProgramTitle => self.program_title = value,
            HeaderField::Episode => self.episode = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_tab_loop() {
        assert_eq!(HeaderField::ProgramTitle.tab_target(true), Some(HeaderField::Episode));
        assert_eq!(HeaderField::Episode.tab_target(false), Some(HeaderField::ProgramTitle));
        assert_eq!(HeaderField::ProgramTitle.tab_target(false), None);
        assert_eq!(HeaderField::Episode.tab_target(true), None);
    }

    #[test]
    fn test_header_values_are_truncated() {
        let mut header = SheetHeader::default();
        header.set(HeaderField::ProgramTitle, &"x".repeat(150), 100);
        assert_eq!(header.program_title.len(), 100);
    }
}
