//! Shared types for the WASM API
//!
//! Payloads the page sends in that have no counterpart in the core model.

use serde::{Deserialize, Serialize};

use crate::drag::RowBox;

/// `dragover` event payload
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DragOverEvent {
    /// Row directly under the pointer, if any
    pub hovered_id: Option<u32>,
    pub pointer_y: f64,
    pub rows: Vec<RowBox>,
}

/// Result of an export: the page triggers the download with this name
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub file_name: String,
    pub row_count: usize,
}
