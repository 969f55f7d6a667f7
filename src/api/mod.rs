//! Cue sheet editor WASM API
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, error handling, and logging
//! - `types`: Payloads exchanged with the page
//! - `workbook`: XlsxPopulate-backed `Workbook`
//! - `editor`: the `CueSheetEditor` class exported to JavaScript

pub mod helpers;
pub mod types;
pub mod workbook;
pub mod editor;

pub use editor::CueSheetEditor;
pub use workbook::JsWorkbook;
