//! Editor configuration
//!
//! Vocabularies, field limits and the spreadsheet template layout. Every key
//! is optional; missing keys fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::errors::{CueSheetError, Result};

pub const DEFAULT_MAX_FIELD_LENGTH: usize = 100;

/// Where things live in the cue sheet template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SheetLayout {
    pub sheet_name: String,
    pub program_title_cell: String,
    pub episode_cell: String,
    /// First data row (1-based, as in A1 notation)
    pub data_start_row: u32,
    /// Last row of the template that already carries the data row style
    pub template_last_row: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet_name: "Cue Sheet".to_string(),
            program_title_cell: "C3".to_string(),
            episode_cell: "C4".to_string(),
            data_start_row: 8,
            template_last_row: 27,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub max_field_length: usize,
    pub modalities: Vec<String>,
    pub music_types: Vec<String>,
    pub file_name_prefix: String,
    pub layout: SheetLayout,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_field_length: DEFAULT_MAX_FIELD_LENGTH,
            modalities: ["BI", "BV", "VI", "VV", "MT", "ET"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            music_types: ["Commercial", "Library", "Original"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            file_name_prefix: "Cue-Sheet".to_string(),
            layout: SheetLayout::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(source)
            .map_err(|e| CueSheetError::Config(format!("invalid YAML: {}", e)))?;
        config.validated()
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source)
            .map_err(|e| CueSheetError::Config(format!("invalid JSON: {}", e)))?;
        config.validated()
    }

    /// Load a `.yaml`/`.yml` or `.json` file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CueSheetError::Config(format!("{}: {}", path.display(), e)))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Vocabulary for a choice field
    pub fn choices(&self, field: crate::models::FieldKey) -> &[String] {
        use crate::models::FieldKey;
        match field {
            FieldKey::Modality => &self.modalities,
            FieldKey::MusicType => &self.music_types,
            _ => &[],
        }
    }

    pub fn validated(self) -> Result<Self> {
        if self.max_field_length == 0 {
            return Err(CueSheetError::Config("maxFieldLength must be positive".into()));
        }
        if self.layout.data_start_row == 0 {
            return Err(CueSheetError::Config("dataStartRow is 1-based".into()));
        }
        if self.layout.template_last_row < self.layout.data_start_row {
            return Err(CueSheetError::Config(format!(
                "templateLastRow {} is above dataStartRow {}",
                self.layout.template_last_row, self.layout.data_start_row
            )));
        }
        crate::spreadsheet::CellRef::parse(&self.layout.program_title_cell)?;
        crate::spreadsheet::CellRef::parse(&self.layout.episode_cell)?;
        Ok(self)
    }
}
