//! TOML configuration
//!
//! Every field is optional; a missing file or key falls back to the default.
//!
//! ```toml
//! data_file = "data/tasks.txt"
//! log_level = "warn"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "data/tasks.txt";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backing file for the task list
    pub data_file: PathBuf,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Read a config file
    ///
    /// Unlike the defaults, a file that was asked for must exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded values
    pub fn with_overrides(mut self, data_file: Option<PathBuf>, log_level: Option<String>) -> Self {
        if let Some(data_file) = data_file {
            self.data_file = data_file;
        }
        if let Some(log_level) = log_level {
            self.log_level = log_level;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_file, PathBuf::from("data/tasks.txt"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_load_partial_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "data_file = \"/tmp/my-tasks.txt\"\n").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/my-tasks.txt"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = Config::load("/nonexistent/taskline.toml").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "data_file = [").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default()
            .with_overrides(Some(PathBuf::from("other.txt")), Some("debug".to_string()));
        assert_eq!(config.data_file, PathBuf::from("other.txt"));
        assert_eq!(config.log_level, "debug");

        let untouched = Config::default().with_overrides(None, None);
        assert_eq!(untouched, Config::default());
    }
}
