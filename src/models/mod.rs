//! Models module for the cue sheet editor
//!
//! This module contains the data models shared by the store, the editors,
//! validation and the spreadsheet adapter.

pub mod field;
pub mod header;
pub mod record;
pub mod timecode;

// Re-export commonly used types
pub use field::{FieldKey, FieldKind};
pub use header::{HeaderField, SheetHeader};
pub use record::Record;
pub use timecode::{duration, Timecode, SENTINEL};
