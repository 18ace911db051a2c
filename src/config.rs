//! Configuration loading for the highlighter.
//!
//! A small TOML surface: length bounds, marker classes, and anchor
//! presentation. Every field has a default, so a partial file (or no file
//! at all) is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name, discovered in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".linkwrap.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HighlightConfig {
    /// Shortest cleaned URL worth linking, in characters.
    pub min_url_length: usize,
    /// Longest cleaned URL worth linking, in characters.
    pub max_url_length: usize,
    /// Class marking the line elements to scan.
    pub line_class: String,
    /// Class stamped on created anchors; doubles as the "already linked" marker.
    pub link_class: String,
    /// Inline style applied to created anchors. Empty disables the attribute.
    pub link_style: String,
    /// Whether anchors open in a new tab (`target="_blank"` plus
    /// `rel="noopener noreferrer"`).
    pub open_in_new_tab: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            min_url_length: crate::validator::MIN_URL_LENGTH,
            max_url_length: crate::validator::MAX_URL_LENGTH,
            line_class: crate::tree::LINE_CLASS.to_string(),
            link_class: crate::tree::LINK_CLASS.to_string(),
            link_style: "color: #4fc3f7; text-decoration: underline;".to_string(),
            open_in_new_tab: true,
        }
    }
}

impl HighlightConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load `.linkwrap.toml` from `dir` when present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            log::debug!("loading config from {}", candidate.display());
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}
