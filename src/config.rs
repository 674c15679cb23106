use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, EXPORT_FILE_NAME, PAGE_SIZES};

/// User settings read from `~/.countries/config.yaml`
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub page_size: usize,
    pub export_dir: PathBuf,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: String::from(DEFAULT_ENDPOINT),
            page_size: DEFAULT_PAGE_SIZE,
            export_dir: PathBuf::from("."),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = Self::default_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring config file");
                Config::default()
            }
        }
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".countries")
            .join("config.yaml")
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        tracing::info!(path = %path.display(), endpoint = %config.endpoint, "Loaded config");
        Ok(config)
    }

    /// Parse YAML settings and repair out-of-range values
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let mut config: Config = serde_yaml::from_str(content)?;

        if !PAGE_SIZES.contains(&config.page_size) {
            tracing::warn!(page_size = config.page_size, "Unsupported page size, using default");
            config.page_size = DEFAULT_PAGE_SIZE;
        }
        if config.timeout_secs == 0 {
            config.timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        Ok(config)
    }

    /// Where the spreadsheet export is written
    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(EXPORT_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse("page_size: 25\nexport_dir: /tmp/out\n").unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.export_path(), PathBuf::from("/tmp/out/Countries.xlsx"));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_unsupported_page_size_falls_back() {
        let config = Config::parse("page_size: 7").unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(Config::parse("page_size: [oops").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "endpoint: http://localhost:4000/graphql\ntimeout_secs: 5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.endpoint, "http://localhost:4000/graphql");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
