//! Configuration schema types for `hue.toml`
//!
//! Defines the structure and validation rules for huebox configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::store::DEFAULT_STORAGE_KEY;

/// Base URL used when building share links
pub const DEFAULT_SHARE_BASE_URL: &str = "https://maro-colorpalette.vercel.app";

/// Directory under the platform data dir holding the storage slot
pub const DATA_DIR_NAME: &str = "huebox";

/// Share link section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Origin that share links point at
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

fn default_base_url() -> String {
    DEFAULT_SHARE_BASE_URL.to_string()
}

/// Saved-palette storage section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Name of the storage slot; the file is `<dir>/<key>.json`
    #[serde(default = "default_key")]
    pub key: String,
    /// Directory holding the slot file (default: platform data dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Explicit slot file, overriding `dir` and `key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { key: default_key(), dir: None, file: None }
    }
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl StorageConfig {
    /// Resolve the slot file path.
    ///
    /// Returns `None` only when no directory is configured and the platform
    /// has no data directory.
    pub fn slot_path(&self) -> Option<PathBuf> {
        if let Some(file) = &self.file {
            return Some(file.clone());
        }
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()?.join(DATA_DIR_NAME),
        };
        Some(dir.join(format!("{}.json", self.key)))
    }
}

/// Root configuration structure for `hue.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HueConfig {
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "share.base_url")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hue.toml: '{}' {}", self.field, self.message)
    }
}

impl HueConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let base_url = &self.share.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            errors.push(ConfigValidationError {
                field: "share.base_url".to_string(),
                message: "must start with http:// or https://".to_string(),
            });
        } else if base_url.contains('?') || base_url.contains('#') {
            errors.push(ConfigValidationError {
                field: "share.base_url".to_string(),
                message: "must not contain a query or fragment".to_string(),
            });
        }

        if self.storage.key.is_empty() {
            errors.push(ConfigValidationError {
                field: "storage.key".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        } else if self.storage.key.contains(['/', '\\']) {
            errors.push(ConfigValidationError {
                field: "storage.key".to_string(),
                message: "must not contain path separators".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: HueConfig = toml::from_str("").unwrap();
        assert_eq!(config, HueConfig::default());
        assert_eq!(config.share.base_url, DEFAULT_SHARE_BASE_URL);
        assert_eq!(config.storage.key, "savedPalettes");
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[share]
base_url = "http://localhost:3000"

[storage]
key = "work"
dir = "/tmp/palettes"
"#;
        let config: HueConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.share.base_url, "http://localhost:3000");
        assert_eq!(config.storage.key, "work");
        assert_eq!(config.storage.slot_path(), Some(PathBuf::from("/tmp/palettes/work.json")));
    }

    #[test]
    fn test_file_overrides_dir() {
        let storage = StorageConfig {
            key: "ignored".to_string(),
            dir: Some(PathBuf::from("/a")),
            file: Some(PathBuf::from("/b/mine.json")),
        };
        assert_eq!(storage.slot_path(), Some(PathBuf::from("/b/mine.json")));
    }

    #[test]
    fn test_validation_errors() {
        let config = HueConfig {
            share: ShareConfig { base_url: "ftp://nope".to_string() },
            storage: StorageConfig { key: "a/b".to_string(), ..Default::default() },
            ..Default::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "share.base_url");
        assert_eq!(errors[1].field, "storage.key");
        assert!(errors[1].to_string().contains("path separators"));
    }

    #[test]
    fn test_base_url_with_query_rejected() {
        let config = HueConfig {
            share: ShareConfig { base_url: "https://h/?x=1".to_string() },
            ..Default::default()
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let config: HueConfig = toml::from_str("[share]\ntheme = \"dark\"\n").unwrap();
        assert_eq!(config.share.base_url, DEFAULT_SHARE_BASE_URL);
    }
}
