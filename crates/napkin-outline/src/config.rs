//! Outline configuration.
//!
//! An [`OutlineConfig`] holds the initial state of an outline panel. It can be
//! read from TOML or JSON; missing keys take their defaults.
//!
//! ```toml
//! root_visible = false
//! case_sensitive = true
//! enabled_types = ["component"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use napkin_outline_core::logging::targets;
use napkin_outline_core::{ObjectKind, OutlineError, Result};

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML.
    Toml,
    /// JSON.
    Json,
}

impl ConfigFormat {
    /// Picks the format from a file extension; anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Initial state of an outline panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Whether the root row itself is shown.
    pub root_visible: bool,
    /// Whether the text filter distinguishes case.
    pub case_sensitive: bool,
    /// Column whose text the text filter inspects.
    pub filter_key_column: usize,
    /// Kinds offered as type filter buttons.
    pub type_buttons: Vec<ObjectKind>,
    /// Kinds checked in the type filter; empty shows all kinds.
    pub enabled_types: Vec<ObjectKind>,
    /// Whether selecting a row publishes the selected object.
    pub propagate_selection: bool,
    /// Column sibling rows are sorted by; unset keeps document order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_column: Option<usize>,
    /// Whether sorting is descending.
    pub sort_descending: bool,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            root_visible: true,
            case_sensitive: false,
            filter_key_column: 0,
            type_buttons: vec![ObjectKind::Entity, ObjectKind::Component, ObjectKind::Attribute],
            enabled_types: Vec::new(),
            propagate_selection: false,
            sort_column: None,
            sort_descending: false,
        }
    }
}

impl OutlineConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| OutlineError::config_parse(None, e.to_string()))
    }

    /// Parses a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| OutlineError::config_parse(None, e.to_string()))
    }

    /// Reads a configuration file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| OutlineError::io(path, e))?;

        let parsed = match ConfigFormat::from_path(path) {
            ConfigFormat::Toml => Self::from_toml_str(&content),
            ConfigFormat::Json => Self::from_json_str(&content),
        };
        let config = parsed.map_err(|err| match err {
            OutlineError::ConfigParse { message, .. } => {
                OutlineError::config_parse(Some(path.to_path_buf()), message)
            }
            other => other,
        })?;

        tracing::debug!(target: targets::PANEL, path = %path.display(), "outline config loaded");
        Ok(config)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| OutlineError::config_parse(None, e.to_string()))
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| OutlineError::config_parse(None, e.to_string()))
    }
}
