//! Configuration loader
//!
//! Reads `config.toml` into the [`AppConfig`] DTO. A missing file is not an
//! error; every key falls back to its default.

use std::path::{Path, PathBuf};

use anyhow::Context;
use wt_core::config::AppConfig;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "WT_CONFIG";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `$WT_CONFIG` when set and non-empty, otherwise `<data_dir>/config.toml`.
pub fn resolve_config_path(data_dir: &Path) -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => data_dir.join(CONFIG_FILE_NAME),
    }
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file exists but cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = match std::fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            })
        }
    };
    let toml_value: toml::Value = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config as TOML: {}", config_path.display()))?;
    AppConfig::from_toml(&toml_value)
}
