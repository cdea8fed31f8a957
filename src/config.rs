//! Runtime configuration.
//!
//! Loaded from a JSON file:
//!
//! ```json
//! {
//!   "log_filter": "dataquery=debug",
//!   "pretty": false,
//!   "seed_files": ["./data/records.jsonl"]
//! }
//! ```
//!
//! Every field is optional.

use crate::types::{DatabaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "DATAQUERY_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Pretty-print JSON results (two-space indent).
    pub pretty: bool,
    /// JSON Lines files upserted into the store at startup, in order.
    pub seed_files: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            pretty: true,
            seed_files: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// Relative `seed_files` are resolved against the config file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DatabaseError::ConfigError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let mut config: Config = serde_json::from_str(&content).map_err(|e| {
            DatabaseError::ConfigError(format!("Invalid config {}: {}", path.display(), e))
        })?;

        if let Some(base) = path.parent() {
            for seed in config.seed_files.iter_mut() {
                if seed.is_relative() {
                    *seed = base.join(&*seed);
                }
            }
        }

        Ok(config)
    }

    /// Load from `path` if given, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config.log_filter, "info");
        assert!(config.pretty);
        assert!(config.seed_files.is_empty());
    }

    #[test]
    fn test_load_partial_file_and_resolve_seeds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"pretty": false, "seed_files": ["seed.jsonl", "/abs.jsonl"]}"#)
            .unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.pretty);
        assert_eq!(config.log_filter, "info");
        assert_eq!(
            config.seed_files,
            vec![dir.path().join("seed.jsonl"), PathBuf::from("/abs.jsonl")]
        );
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"prety": false}"#).unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(DatabaseError::ConfigError(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Config::load(dir.path().join("nope.json")),
            Err(DatabaseError::ConfigError(_))
        ));
    }
}
