//! Service configuration
//!
//! Loaded from a JSON file; every field has a default so the file itself
//! is optional. Command-line flags are applied on top.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::validation::MAX_CHIRP_LENGTH;

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "chirpy.json";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backing file of the record store
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Longest accepted chirp, in bytes
    #[serde(default = "default_max_chirp_length")]
    pub max_chirp_length: usize,

    #[serde(flatten)]
    pub http: HttpServerConfig,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("database.json")
}

fn default_max_chirp_length() -> usize {
    MAX_CHIRP_LENGTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            max_chirp_length: default_max_chirp_length(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Loads an explicit config path, or `chirpy.json` if present, or defaults.
    pub fn resolve(explicit: Option<&Path>) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }
        if self.max_chirp_length == 0 {
            return Err(CliError::config_error("max_chirp_length must be > 0"));
        }
        if self.http.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }
        Ok(())
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, port: Option<u16>, database: Option<PathBuf>) -> Self {
        if let Some(port) = port {
            self.http.port = port;
        }
        if let Some(database) = database {
            self.database_path = database;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database_path, PathBuf::from("database.json"));
        assert_eq!(config.max_chirp_length, 140);
        assert_eq!(config.http.port, 8080);
    }

    #[test]
    fn test_load_flat_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("chirpy.json");
        fs::write(
            &path,
            r#"{"database_path": "/var/lib/chirpy/db.json", "port": 9999, "static_dir": "public"}"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/var/lib/chirpy/db.json"));
        assert_eq!(config.http.port, 9999);
        assert_eq!(config.http.static_dir, PathBuf::from("public"));
        assert_eq!(config.http.host, "0.0.0.0");
    }

    #[test]
    fn test_load_rejects_zero_length_limit() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("chirpy.json");
        fs::write(&path, r#"{"max_chirp_length": 0}"#).unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(Config::resolve(Some(&tmp.path().join("missing.json"))).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some(3000), Some(PathBuf::from("x.json")));
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.database_path, PathBuf::from("x.json"));
    }
}
