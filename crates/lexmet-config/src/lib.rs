//! Configuration for the lexmet corpus metrics pipeline.
//!
//! lexmet reads an optional TOML file named `lexmet.toml` that sets the
//! data root and may replace the built-in category keyword table. A
//! missing file is not an error: the built-in defaults describe a usable
//! pipeline out of the box.

#![warn(missing_docs)]

mod error;
mod parse;

use std::path::{Path, PathBuf};

pub use error::ConfigError;
pub use parse::{RawCategory, RawConfig, parse_config_file, parse_config_str};

/// Default configuration file name.
pub const CONFIG_FILENAME: &str = "lexmet.toml";

/// Default data root, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "lexmet-data";

/// A named topical category defined by a fixed keyword set.
///
/// Categories are static configuration, not derived data. Keyword order is
/// preserved; declaration order across categories is the tie-break when a
/// document scores equally against several of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category name, used as the cluster key.
    pub name: String,
    /// Ordered keyword list scored against document TF-IDF vectors.
    pub keywords: Vec<String>,
}

impl Category {
    /// Creates a category from a name and keyword list.
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory under which all pipeline directories live.
    pub data_dir: PathBuf,
    /// Category table used by the categorizer, in declaration order.
    pub categories: Vec<Category>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            categories: default_categories(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`.
    ///
    /// Returns the defaults if the file does not exist; returns an error if
    /// it exists but cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = parse_config_file(path)?;
        Self::from_raw(raw)
    }

    /// Resolves a parsed raw configuration against the defaults.
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let categories = match raw.category {
            Some(raw_categories) => validate_categories(raw_categories)?,
            None => default_categories(),
        };

        Ok(Self {
            data_dir: raw.data_dir.map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
            categories,
        })
    }
}

/// Validates raw categories and converts them into the resolved form.
fn validate_categories(raw: Vec<RawCategory>) -> Result<Vec<Category>, ConfigError> {
    let mut categories = Vec::with_capacity(raw.len());
    for (index, category) in raw.into_iter().enumerate() {
        if category.name.is_empty() {
            return Err(ConfigError::EmptyCategoryName { index });
        }
        if category.keywords.is_empty() {
            return Err(ConfigError::EmptyKeywordList {
                name: category.name,
            });
        }
        if categories
            .iter()
            .any(|c: &Category| c.name == category.name)
        {
            return Err(ConfigError::DuplicateCategory {
                name: category.name,
            });
        }
        categories.push(Category {
            name: category.name,
            keywords: category.keywords,
        });
    }
    Ok(categories)
}

/// The built-in category keyword table.
///
/// Deliberately small keyword lists; configurations can replace them
/// wholesale via `[[category]]` entries.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(
            "mathematics",
            &[
                "math",
                "calculus",
                "algebra",
                "geometry",
                "equation",
                "theorem",
                "integral",
                "derivative",
            ],
        ),
        Category::new(
            "physics",
            &[
                "physics",
                "force",
                "energy",
                "mass",
                "velocity",
                "gravity",
                "quantum",
                "relativity",
                "thermodynamics",
            ],
        ),
        Category::new(
            "chemistry",
            &[
                "chemistry",
                "element",
                "compound",
                "reaction",
                "molecule",
                "acid",
                "base",
                "organic",
                "inorganic",
            ],
        ),
        Category::new(
            "programming",
            &[
                "python",
                "java",
                "code",
                "algorithm",
                "function",
                "class",
                "variable",
                "pointer",
                "software",
                "database",
            ],
        ),
    ]
}
