//! Timecodes (elapsed HH:MM:SS, not wall-clock time)

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{CueSheetError, Result};

/// Stored value of a timecode field that was never set
pub const SENTINEL: &str = "00:00:00";

pub const MAX_HOURS: u8 = 99;
pub const MAX_MINUTES: u8 = 59;
pub const MAX_SECONDS: u8 = 59;

static TIMECODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2}):(\d{2}):(\d{2})$").expect("timecode pattern"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timecode {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Timecode {
    pub const ZERO: Timecode = Timecode { hours: 0, minutes: 0, seconds: 0 };

    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            hours: hours.min(MAX_HOURS),
            minutes: minutes.min(MAX_MINUTES),
            seconds: seconds.min(MAX_SECONDS),
        }
    }

    /// Parse `HH:MM:SS`; minutes and seconds must be in 0-59
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || CueSheetError::InvalidTimeFormat { value: value.to_string() };
        let caps = TIMECODE_RE.captures(value.trim()).ok_or_else(invalid)?;

        let part = |i: usize| caps[i].parse::<u8>().map_err(|_| invalid());
        let (hours, minutes, seconds) = (part(1)?, part(2)?, part(3)?);

        if minutes > MAX_MINUTES || seconds > MAX_SECONDS {
            return Err(invalid());
        }

        Ok(Self { hours, minutes, seconds })
    }

    pub fn total_seconds(&self) -> u32 {
        self.hours as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32
    }

    /// Hours saturate at 99
    pub fn from_seconds(total: u32) -> Self {
        let hours = (total / 3600).min(MAX_HOURS as u32) as u8;
        Self {
            hours,
            minutes: ((total % 3600) / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    /// Spreadsheet time cells hold a fraction of a day
    pub fn from_day_fraction(fraction: f64) -> Option<Self> {
        if !fraction.is_finite() || fraction < 0.0 {
            return None;
        }
        let seconds = (fraction * 86_400.0).round();
        Some(Self::from_seconds(seconds as u32))
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl FromStr for Timecode {
    type Err = CueSheetError;

    fn from_str(s: &str) -> Result<Self> {
        Timecode::parse(s)
    }
}

/// `tc_out - tc_in` as HH:MM:SS.
///
/// `None` when either side is malformed or when the out point is not strictly
/// after the in point. Display and export share this rule.
pub fn duration(tc_in: &str, tc_out: &str) -> Option<String> {
    let start = Timecode::parse(tc_in).ok()?;
    let end = Timecode::parse(tc_out).ok()?;
    if end <= start {
        return None;
    }
    Some(Timecode::from_seconds(end.total_seconds() - start.total_seconds()).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let tc = Timecode::parse("01:02:03").unwrap();
        assert_eq!(tc, Timecode::new(1, 2, 3));
        assert_eq!(tc.to_string(), "01:02:03");
        assert_eq!(tc.total_seconds(), 3723);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["1:00:00", "01:60:00", "01:00:60", "01-00-00", "", "aa:bb:cc", "01:00:00:00"] {
            assert!(
                matches!(Timecode::parse(bad), Err(CueSheetError::InvalidTimeFormat { .. })),
                "{} should be rejected",
                bad
            );
        }
        assert!(Timecode::parse("99:59:59").is_ok());
    }

    #[test]
    fn test_duration() {
        assert_eq!(duration("01:00:00", "01:00:10").as_deref(), Some("00:00:10"));
        assert_eq!(duration("00:59:30", "01:01:00").as_deref(), Some("00:01:30"));
        assert_eq!(duration("01:00:10", "01:00:00"), None);
        assert_eq!(duration("01:00:00", "01:00:00"), None);
        assert_eq!(duration(SENTINEL, "garbage"), None);
    }

    #[test]
    fn test_from_day_fraction() {
        assert_eq!(Timecode::from_day_fraction(0.5), Some(Timecode::new(12, 0, 0)));
        // 00:01:30 stored as a float loses precision; rounding brings it back
        assert_eq!(Timecode::from_day_fraction(90.0 / 86_400.0), Some(Timecode::new(0, 1, 30)));
        assert_eq!(Timecode::from_day_fraction(-1.0), None);
    }

    #[test]
    fn test_from_seconds_saturates_hours() {
        assert_eq!(Timecode::from_seconds(100 * 3600).hours, 99);
    }
}
