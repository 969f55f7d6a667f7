//! Time-of-day style picker for the tcIn/tcOut fields
//!
//! One unit (hours, minutes or seconds) is active at a time. Typed digits go
//! into a two-character buffer for that unit; arrows step it by one. Values
//! clamp to the unit's range and never wrap.

use serde::{Deserialize, Serialize};

use crate::models::{FieldKey, Record, Timecode, SENTINEL};
use crate::models::timecode::{MAX_HOURS, MAX_MINUTES, MAX_SECONDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeUnit {
    Hh,
    Mm,
    Ss,
}

impl TimeUnit {
    fn max(self) -> u8 {
        match self {
            TimeUnit::Hh => MAX_HOURS,
            TimeUnit::Mm => MAX_MINUTES,
            TimeUnit::Ss => MAX_SECONDS,
        }
    }

    fn next(self) -> Option<TimeUnit> {
        match self {
            TimeUnit::Hh => Some(TimeUnit::Mm),
            TimeUnit::Mm => Some(TimeUnit::Ss),
            TimeUnit::Ss => None,
        }
    }

    fn prev(self) -> Option<TimeUnit> {
        match self {
            TimeUnit::Hh => None,
            TimeUnit::Mm => Some(TimeUnit::Hh),
            TimeUnit::Ss => Some(TimeUnit::Mm),
        }
    }
}

/// Result of Tab / Shift+Tab inside the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStep {
    /// Focus moved to another unit
    Unit(TimeUnit),
    /// Moved past the first/last unit; the edit should commit and focus
    /// leave in that direction
    Leave { backward: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEdit {
    pub record_id: u32,
    pub field: FieldKey,
    pub unit: TimeUnit,
    pub buffer: String,
    pub value: Timecode,
    /// Restored on cancel
    pub original: String,
}

impl TimeEdit {
    pub fn open(record: &Record, field: FieldKey) -> Self {
        let stored = record.field(field);
        let original = if stored.trim().is_empty() {
            SENTINEL.to_string()
        } else {
            stored.to_string()
        };
        Self {
            record_id: record.id,
            field,
            unit: TimeUnit::Hh,
            buffer: String::new(),
            value: Timecode::parse(stored).unwrap_or(Timecode::ZERO),
            original,
        }
    }

    fn unit_value(&self) -> u8 {
        match self.unit {
            TimeUnit::Hh => self.value.hours,
            TimeUnit::Mm => self.value.minutes,
            TimeUnit::Ss => self.value.seconds,
        }
    }

    fn set_unit_value(&mut self, raw: i32) {
        let clamped = raw.clamp(0, self.unit.max() as i32) as u8;
        match self.unit {
            TimeUnit::Hh => self.value.hours = clamped,
            TimeUnit::Mm => self.value.minutes = clamped,
            TimeUnit::Ss => self.value.seconds = clamped,
        }
    }

    /// Type a digit into the active unit. Non-digits are ignored.
    pub fn digit(&mut self, ch: char) -> bool {
        let Some(d) = ch.to_digit(10) else {
            return false;
        };
        self.buffer.push(char::from(b'0' + d as u8));

        let parsed: i32 = self.buffer.parse().unwrap_or(0);
        self.set_unit_value(parsed);

        if self.buffer.len() >= 2 {
            self.buffer.clear();
        }
        true
    }

    /// Arrow up/down
    pub fn step(&mut self, delta: i32) {
        let current = self.unit_value() as i32;
        self.set_unit_value(current + delta);
        self.buffer.clear();
    }

    pub fn select_unit(&mut self, unit: TimeUnit) {
        self.unit = unit;
        self.buffer.clear();
    }

    pub fn tab(&mut self, backward: bool) -> TabStep {
        let target = if backward { self.unit.prev() } else { self.unit.next() };
        match target {
            Some(unit) => {
                self.select_unit(unit);
                TabStep::Unit(unit)
            }
            None => TabStep::Leave { backward },
        }
    }

    pub fn formatted(&self) -> String {
        self.value.to_string()
    }
}
