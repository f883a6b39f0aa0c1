// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use poster_stamp::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.language = Some("zh-CN".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.language, Some("zh-CN".to_string()));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::domain::geometry::PreviewSize;
use crate::error::Result;
use defaults::{
    BYTES_PER_MB, DEFAULT_MAX_UPLOAD_MB, DEFAULT_PREVIEW_HEIGHT, DEFAULT_PREVIEW_WIDTH,
    MAX_PREVIEW_EDGE,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "PosterStamp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub preview_width: Option<u32>,
    #[serde(default)]
    pub preview_height: Option<u32>,
    #[serde(default)]
    pub max_upload_mb: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            preview_width: Some(DEFAULT_PREVIEW_WIDTH),
            preview_height: Some(DEFAULT_PREVIEW_HEIGHT),
            max_upload_mb: Some(DEFAULT_MAX_UPLOAD_MB),
        }
    }
}

impl Config {
    /// Preview surface size, falling back to defaults and capping oversized edges.
    #[must_use]
    pub fn preview_size(&self) -> PreviewSize {
        let width = self
            .preview_width
            .unwrap_or(DEFAULT_PREVIEW_WIDTH)
            .min(MAX_PREVIEW_EDGE);
        let height = self
            .preview_height
            .unwrap_or(DEFAULT_PREVIEW_HEIGHT)
            .min(MAX_PREVIEW_EDGE);
        PreviewSize::new(width, height)
    }

    /// Upload limit in bytes.
    #[must_use]
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB)
            .saturating_mul(BYTES_PER_MB)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = ?path, %err, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_fields() {
        let config = Config {
            language: Some("zh-CN".to_string()),
            preview_width: Some(800),
            preview_height: Some(600),
            max_upload_mb: Some(4),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.language.is_none());
        assert_eq!(loaded.preview_width, Some(DEFAULT_PREVIEW_WIDTH));
    }

    #[test]
    fn missing_optional_fields_deserialize_as_none() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "language = \"en-US\"\n").expect("write settings");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.language.as_deref(), Some("en-US"));
        assert!(loaded.preview_width.is_none());
        // Accessors still fall back to defaults.
        assert_eq!(
            loaded.preview_size(),
            PreviewSize::new(DEFAULT_PREVIEW_WIDTH, DEFAULT_PREVIEW_HEIGHT)
        );
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn preview_size_caps_oversized_edges() {
        let config = Config {
            preview_width: Some(100_000),
            preview_height: Some(300),
            ..Config::default()
        };
        assert_eq!(config.preview_size(), PreviewSize::new(MAX_PREVIEW_EDGE, 300));
    }

    #[test]
    fn default_upload_limit_is_ten_megabytes() {
        assert_eq!(Config::default().max_upload_bytes(), 10 * 1024 * 1024);
    }
}
