//! Error types for lexmet configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use toml::de;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// A category was declared without a name.
    #[error("category at index {index} has an empty name")]
    EmptyCategoryName {
        /// Zero-based position of the category in the config file.
        index: usize,
    },

    /// A category was declared with no keywords.
    #[error("category '{name}' has no keywords")]
    EmptyKeywordList {
        /// Name of the offending category.
        name: String,
    },

    /// Two categories share the same name.
    #[error("duplicate category name: {name}")]
    DuplicateCategory {
        /// The duplicated name.
        name: String,
    },
}
