//! Cue Sheet Editor WASM Module
//!
//! State and rules for a single-page cue sheet form: the record list, inline
//! editors, drag reordering, bulk delete with undo, validation and the
//! spreadsheet import/export mapping. The page only renders and forwards
//! events.

pub mod api;
pub mod config;
pub mod drag;
pub mod editor;
pub mod errors;
pub mod models;
pub mod renderers;
pub mod session;
pub mod spreadsheet;
pub mod store;
pub mod undo;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::EditorConfig;
pub use errors::{CueSheetError, Result};
pub use models::*;
pub use session::{CueSheet, ImportMode, ImportPrompt};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logging();

    log::info!("Cue sheet editor WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::warn!("logger already initialized");
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logging() {}
