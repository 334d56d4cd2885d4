//! Configuration schema types for `pxedit.toml`
//!
//! Defines the structure and validation rules for editor configuration.

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::color::{parse_color, ColorError};
use crate::document::PixelLayout;
use crate::models::{DEFAULT_PLAYBACK_RATE, DEFAULT_SIZE, MAX_CANVAS_SIZE};

/// Canvas defaults for new projects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Side of the square canvas in pixels
    #[serde(default = "default_size")]
    pub size: u32,
    /// Frames per second for preview and GIF export
    #[serde(default = "default_playback_rate")]
    pub playback_rate: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { size: default_size(), playback_rate: default_playback_rate() }
    }
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}

fn default_playback_rate() -> u32 {
    DEFAULT_PLAYBACK_RATE
}

/// Initial foreground brush
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Hex color; only RGB is used
    #[serde(default = "default_color")]
    pub color: String,
    /// Paint opacity, 0-255
    #[serde(default = "default_opacity")]
    pub opacity: u8,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self { color: default_color(), opacity: default_opacity() }
    }
}

impl BrushConfig {
    pub fn parse_color(&self) -> Result<Rgba<u8>, ColorError> {
        parse_color(&self.color)
    }
}

fn default_color() -> String {
    "#FFFFFF".to_string()
}

fn default_opacity() -> u8 {
    255
}

/// Project document settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default)]
    pub pixel_layout: PixelLayout,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_level(), json: false }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

/// Root configuration structure for `pxedit.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PxeConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub brush: BrushConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// A single configuration validation error
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Dotted path of the offending field
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl PxeConfig {
    /// Validate the configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.canvas.size == 0 || self.canvas.size > MAX_CANVAS_SIZE {
            errors.push(ConfigValidationError {
                field: "canvas.size".to_string(),
                message: format!("must be between 1 and {}", MAX_CANVAS_SIZE),
            });
        }

        if self.canvas.playback_rate == 0 {
            errors.push(ConfigValidationError {
                field: "canvas.playback_rate".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if let Err(e) = self.brush.parse_color() {
            errors.push(ConfigValidationError {
                field: "brush.color".to_string(),
                message: e.to_string(),
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
        let config: PxeConfig = toml::from_str("").unwrap();
        assert_eq!(config.canvas.size, DEFAULT_SIZE);
        assert_eq!(config.canvas.playback_rate, DEFAULT_PLAYBACK_RATE);
        assert_eq!(config.brush.parse_color().unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(config.brush.opacity, 255);
        assert_eq!(config.document.pixel_layout, PixelLayout::Legacy);
        assert_eq!(config.logging.level, "warn");
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config() {
        let config: PxeConfig = toml::from_str(
            r##"
[canvas]
size = 32
playback_rate = 12

[brush]
color = "#336699"
opacity = 128

[document]
pixel_layout = "row-major"

[logging]
level = "debug"
json = true
"##,
        )
        .unwrap();
        assert_eq!(config.canvas.size, 32);
        assert_eq!(config.canvas.playback_rate, 12);
        assert_eq!(config.brush.parse_color().unwrap(), Rgba([0x33, 0x66, 0x99, 255]));
        assert_eq!(config.brush.opacity, 128);
        assert_eq!(config.document.pixel_layout, PixelLayout::RowMajor);
        assert!(config.logging.json);
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let mut config = PxeConfig::default();
        config.canvas.size = 0;
        config.canvas.playback_rate = 0;
        config.brush.color = "#XYZ".to_string();

        let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["canvas.size", "canvas.playback_rate", "brush.color"]);
    }

    #[test]
    fn test_oversized_canvas_fails_validation() {
        let mut config = PxeConfig::default();
        config.canvas.size = MAX_CANVAS_SIZE;
        assert!(config.is_valid());

        config.canvas.size = u32::MAX;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "canvas.size");
        assert_eq!(errors[0].message, "must be between 1 and 4096");
    }

    #[test]
    fn test_unknown_layout_rejected() {
        let result: Result<PxeConfig, _> = toml::from_str("[document]\npixel_layout = \"diagonal\"");
        assert!(result.is_err());
    }
}
