//! Configuration loading and discovery for `hue.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::HueConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "hue.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse hue.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Use this file as the storage slot
    pub store: Option<PathBuf>,
    /// Override the share link origin
    pub base_url: Option<String>,
}

/// Find hue.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for hue.toml
/// 2. Check XDG_CONFIG_HOME/huebox/hue.toml (or ~/.config/huebox/hue.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find hue.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("huebox").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find hue.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a hue.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
pub fn load_config(path: Option<&Path>) -> Result<HueConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(HueConfig::default()),
    }
}

/// Load configuration from a specific file path.
///
/// A relative `storage.dir` or `storage.file` is resolved against the
/// directory containing the config file.
fn load_config_file(path: &Path) -> Result<HueConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: HueConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    if let Some(root) = config_root(path) {
        config.storage.dir = config.storage.dir.map(|d| resolve_path(root, &d));
        config.storage.file = config.storage.file.map(|f| resolve_path(root, &f));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut HueConfig, overrides: &CliOverrides) {
    if let Some(ref store) = overrides.store {
        config.storage.file = Some(store.clone());
    }

    if let Some(ref base_url) = overrides.base_url {
        config.share.base_url = base_url.clone();
    }
}

/// Directory containing a config file.
pub fn config_root(config_path: &Path) -> Option<&Path> {
    config_path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Resolve a path relative to the config directory.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
