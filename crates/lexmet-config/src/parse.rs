//! Configuration file parsing.
//!
//! Parses a `lexmet.toml` file into an intermediate `RawConfig` structure
//! that preserves the optional nature of all fields before defaults are
//! applied.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional; anything absent falls back to the built-in
/// defaults when the [`crate::Config`] is resolved.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// Root directory for all pipeline data.
    pub data_dir: Option<String>,
    /// Category definitions, replacing the default table when present.
    pub category: Option<Vec<RawCategory>>,
}

/// Raw category definition from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    /// Category name.
    pub name: String,
    /// Ordered keyword list scored against document TF-IDF vectors.
    pub keywords: Vec<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` is used only for error context.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}
