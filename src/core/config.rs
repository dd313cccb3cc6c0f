//! Loads user settings from `config.toml` in the data directory.

use crate::api::{ImportStrategy, SortOrder, StoreError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_DATA_FILE: &str = "vault.json";
pub const DEFAULT_DUPLICATE_SUFFIX: &str = " (Copy)";

#[derive(Deserialize, Debug, Default)]
struct ConfigFile {
    data_file: Option<String>,
    sort: Option<String>,
    import_strategy: Option<String>,
    duplicate_suffix: Option<String>,
}

/// Resolved settings, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Persisted document location; relative paths are resolved against the data directory.
    pub data_file: PathBuf,
    pub sort: SortOrder,
    pub import_strategy: ImportStrategy,
    /// Appended to the title of duplicated prompts.
    pub duplicate_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            sort: SortOrder::default(),
            import_strategy: ImportStrategy::default(),
            duplicate_suffix: DEFAULT_DUPLICATE_SUFFIX.to_string(),
        }
    }
}

impl FromStr for Config {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let file: ConfigFile = toml::from_str(s)
            .map_err(|e| StoreError::Configuration(format!("Failed to parse config.toml: {}", e)))?;

        let mut config = Config::default();
        if let Some(data_file) = file.data_file.filter(|d| !d.trim().is_empty()) {
            config.data_file = PathBuf::from(data_file);
        }
        if let Some(sort) = file.sort {
            config.sort = sort.parse()?;
        }
        if let Some(strategy) = file.import_strategy {
            config.import_strategy = strategy.parse()?;
        }
        if let Some(suffix) = file.duplicate_suffix {
            config.duplicate_suffix = suffix;
        }
        Ok(config)
    }
}

/// Loads `<base_dir>/config.toml`, falling back to defaults when it does not exist.
pub fn load_config(base_dir: &Path) -> Result<Config, StoreError> {
    let config_path = base_dir.join("config.toml");
    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path)?;
    let config: Config = content.parse()?;
    tracing::debug!(path = %config_path.display(), ?config, "Loaded configuration");
    Ok(config)
}
