//! Configuration loading and discovery for `pxedit.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::PxeConfig;
use crate::document::PixelLayout;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for.
pub const CONFIG_FILE_NAME: &str = "pxedit.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pxedit.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override document pixel layout
    pub pixel_layout: Option<PixelLayout>,
    /// Override playback rate
    pub playback_rate: Option<u32>,
    /// Override log filter
    pub log_level: Option<String>,
}

/// Find pxedit.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for pxedit.toml
/// 2. Check XDG_CONFIG_HOME/pxedit/pxedit.toml (or ~/.config/pxedit/pxedit.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find pxedit.toml in XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("pxedit").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find pxedit.toml by walking up from a specific directory.
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

/// Load configuration from a pxedit.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// `find_config()` to locate one. If no config file is found, returns the
/// default configuration.
pub fn load_config(path: Option<&Path>) -> Result<PxeConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(PxeConfig::default()),
    }
}

fn load_config_file(path: &Path) -> Result<PxeConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: PxeConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Apply CLI overrides on top of a loaded configuration.
pub fn merge_cli_overrides(config: &mut PxeConfig, overrides: &CliOverrides) {
    if let Some(layout) = overrides.pixel_layout {
        config.document.pixel_layout = layout;
    }

    if let Some(rate) = overrides.playback_rate {
        config.canvas.playback_rate = rate;
    }

    if let Some(ref level) = overrides.log_level {
        config.logging.level = level.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &[u8]) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(content)
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[canvas]\nsize = 4");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[canvas]\nsize = 4");

        let subdir = temp.path().join("art").join("walk");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        assert_eq!(find_config_from(temp.path().to_path_buf()), None);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            br##"
[canvas]
size = 24
playback_rate = 6

[brush]
color = "#102030"
"##,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.canvas.size, 24);
        assert_eq!(config.canvas.playback_rate, 6);
        assert_eq!(config.brush.color, "#102030");
        assert_eq!(config.brush.opacity, 255);
    }

    #[test]
    fn test_load_config_missing_file_errors() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"this is not valid toml {{{");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[canvas]\nsize = 0\nplayback_rate = 0\n");

        match load_config(Some(&config_path)) {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = PxeConfig::default();
        let overrides = CliOverrides {
            pixel_layout: Some(PixelLayout::RowMajor),
            playback_rate: Some(10),
            log_level: Some("debug".to_string()),
        };
        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.document.pixel_layout, PixelLayout::RowMajor);
        assert_eq!(config.canvas.playback_rate, 10);
        assert_eq!(config.logging.level, "debug");

        merge_cli_overrides(&mut config, &CliOverrides::default());
        assert_eq!(config.canvas.playback_rate, 10);
    }
}
