//! Expansion settings
//!
//! Settings are plain serde data stored as versioned JSON. Every field has a
//! default, so a partial document only overrides what it names.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::Dialect;

/// Settings load/store errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Failed to serialize settings: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize settings: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),

    #[error("Failed to read settings file: {0}")]
    Io(String),
}

/// Content types of embedded regions where expansion is still allowed
pub const DEFAULT_ALLOWED_CONTENT_TYPES: &[&str] = &[
    "html",
    "htmlx",
    "inert",
    "CSharp",
    "VisualBasic",
    "RoslynCSharp",
    "RoslynVisualBasic",
];

/// Expansion settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandSettings {
    /// Format version (for future migrations)
    pub version: u32,
    /// Name of the undo transaction wrapping an expansion
    pub transaction_name: String,
    /// Dialect requested from the grammar engine
    pub dialect: Dialect,
    /// Reformat the inserted text before placing the caret
    pub format_after_expand: bool,
    /// Embedded content types that do not veto expansion
    pub allowed_content_types: Vec<String>,
}

impl ExpandSettings {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            transaction_name: "Expand Abbreviation".to_string(),
            dialect: Dialect::Html,
            format_after_expand: true,
            allowed_content_types: DEFAULT_ALLOWED_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Parse settings from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, SettingsError> {
        let settings: ExpandSettings = serde_json::from_slice(bytes)
            .map_err(|e| SettingsError::DeserializationFailed(e.to_string()))?;

        if settings.version != Self::CURRENT_VERSION {
            return Err(SettingsError::UnsupportedVersion(settings.version));
        }

        Ok(settings)
    }

    /// Serialize settings to pretty JSON bytes
    pub fn to_json(&self) -> Result<Vec<u8>, SettingsError> {
        serde_json::to_vec_pretty(self).map_err(|e| SettingsError::SerializationFailed(e.to_string()))
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let bytes = fs::read(path.as_ref()).map_err(|e| SettingsError::Io(e.to_string()))?;
        Self::from_json(&bytes)
    }
}

impl Default for ExpandSettings {
    fn default() -> Self {
        Self::new()
    }
}
