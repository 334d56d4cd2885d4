//! Configuration module for the editor
//!
//! Provides types and parsing for `pxedit.toml`.

pub mod loader;
pub mod schema;

pub use loader::{load_config, merge_cli_overrides, CliOverrides, ConfigError};
pub use schema::*;
