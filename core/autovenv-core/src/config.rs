//! User configuration loading.
//!
//! A single optional JSON file; a missing or malformed file yields the
//! defaults, never an error.

use fs_err as fs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::locator::DEFAULT_MARKER;

/// Settings read from `~/.config/autovenv/config.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AutovenvConfig {
    /// Marker directory name to search for.
    pub marker: String,
    /// Shell snippets to run after each activation, in order.
    pub on_activate: Vec<String>,
    /// Shell snippets to run after each deactivation, in order.
    pub on_deactivate: Vec<String>,
}

impl Default for AutovenvConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            on_activate: Vec::new(),
            on_deactivate: Vec::new(),
        }
    }
}

/// Returns the path to the configuration file.
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("autovenv").join("config.json"))
}

/// Loads the configuration, returning defaults if the file doesn't exist.
pub fn load_config() -> AutovenvConfig {
    get_config_path()
        .map(|p| load_config_from(&p))
        .unwrap_or_default()
}

/// Loads configuration from an explicit path; defaults on any failure.
pub fn load_config_from(path: &Path) -> AutovenvConfig {
    fs::read_to_string(path)
        .ok()
        .and_then(|c| serde_json::from_str(&c).ok())
        .unwrap_or_default()
}
