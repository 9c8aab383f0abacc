//! Application configuration.
//!
//! Names the database file and table the console manager works against.
//! Values come from an optional YAML file and can be overridden on the
//! command line.
//!
//! # Example YAML
//!
//! ```yaml
//! database: ebookstore
//! table: books
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stockroom_core::BOOK_TABLE;
use thiserror::Error;

/// Database file used when none is configured.
pub const DEFAULT_DATABASE: &str = "ebookstore";

/// Errors raised while reading or writing configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for configuration results.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Database and table selection for one run.
///
/// Missing keys in a YAML file fall back to their defaults.
///
/// # Examples
///
/// ```
/// use stockroom_cli::AppConfig;
///
/// let config: AppConfig = serde_yaml::from_str("table: books").unwrap();
/// assert_eq!(config.database.to_str(), Some("ebookstore"));
///
/// let config = config.with_overrides(Some("stock.db".into()), None);
/// assert_eq!(config.database.to_str(), Some("stock.db"));
/// assert_eq!(config.table, "books");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path of the SQLite database file. Created on first use.
    pub database: PathBuf,
    /// Table holding the entities; selects the entity type.
    pub table: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            table: BOOK_TABLE.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be read, or
    /// [`ConfigError::YamlError`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be written, or
    /// [`ConfigError::YamlError`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Replaces values with those given explicitly, leaving the rest.
    pub fn with_overrides(mut self, database: Option<PathBuf>, table: Option<String>) -> Self {
        if let Some(database) = database {
            self.database = database;
        }
        if let Some(table) = table {
            self.table = table;
        }
        self
    }
}
