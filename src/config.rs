//! Application configuration.
//!
//! Read from `config.yaml` when present, then overridden by `.env` values and
//! the process environment. Every field has a default, so a missing file is
//! not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::AppError;

pub const DEFAULT_ITUNES_BASE_URL: &str = "https://itunes.apple.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub itunes_base_url: String,
    /// Results per catalog search.
    pub search_limit: u32,
    /// Episodes fetched per episode lookup.
    pub episode_lookup_limit: u32,
    pub request_timeout_secs: u64,
    pub log_level: String,
    /// `config.yaml` this was read from, if any. Logged by the caller once
    /// logging is up.
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            itunes_base_url: DEFAULT_ITUNES_BASE_URL.to_string(),
            search_limit: 20,
            episode_lookup_limit: 50,
            request_timeout_secs: 15,
            log_level: "info".to_string(),
            loaded_from: None,
        }
    }
}

impl AppConfig {
    /// Load `config.yaml` from `project_dir` and apply `.env` and
    /// environment overrides.
    pub fn load(project_dir: &Path) -> Result<Self, AppError> {
        let config_path = project_dir.join("config.yaml");
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let mut config: AppConfig = serde_yaml::from_str(&content)?;
            config.loaded_from = Some(config_path);
            config
        } else {
            AppConfig::default()
        };

        if let Some(path) = lookup(project_dir, "PODRATE_DB_PATH") {
            config.database_path = PathBuf::from(path);
        }
        if let Some(url) = lookup(project_dir, "PODRATE_ITUNES_URL") {
            config.itunes_base_url = url;
        }
        if let Some(level) = lookup(project_dir, "PODRATE_LOG") {
            config.log_level = level;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        let config: AppConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.search_limit == 0 || self.episode_lookup_limit == 0 {
            return Err(AppError::Config("limits must be greater than zero".to_string()));
        }
        if !self.itunes_base_url.starts_with("http") {
            return Err(AppError::Config(format!(
                "itunes_base_url '{}' is not an http(s) URL",
                self.itunes_base_url
            )));
        }
        Ok(())
    }
}

fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("podrate")
        .join("podrate.db")
}

// Process environment wins over the .env file.
fn lookup(project_dir: &Path, key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| load_env_value(project_dir, key))
}

/// Load a value from the .env file by key name
pub fn load_env_value(project_dir: &Path, key: &str) -> Option<String> {
    let env_path = project_dir.join(".env");
    let prefix = format!("{}=", key);
    let content = std::fs::read_to_string(env_path).ok()?;
    content
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(&prefix))
        .map(|value| value.trim().trim_matches('"').trim_matches('\''))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.itunes_base_url, DEFAULT_ITUNES_BASE_URL);
        assert_eq!(config.search_limit, 20);
        assert_eq!(config.episode_lookup_limit, 50);
        assert!(config.database_path.ends_with("podrate/podrate.db"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml("search_limit: 5\nlog_level: debug\n").unwrap();
        assert_eq!(config.search_limit, 5);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.episode_lookup_limit, 50);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(AppConfig::from_yaml("search_limit: 0").is_err());
        assert!(AppConfig::from_yaml("itunes_base_url: ftp://nope").is_err());
        assert!(AppConfig::from_yaml("search_limit: [1, 2]").is_err());
    }

    #[test]
    fn test_load_reads_yaml_and_env_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.yaml"), "episode_lookup_limit: 10\n").unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "# local\nPODRATE_TEST_ONLY_KEY=\"quoted\"\n",
        )
        .unwrap();

        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.episode_lookup_limit, 10);
        assert_eq!(config.loaded_from, Some(dir.path().join("config.yaml")));
        assert_eq!(
            load_env_value(dir.path(), "PODRATE_TEST_ONLY_KEY").as_deref(),
            Some("quoted")
        );
        assert_eq!(load_env_value(dir.path(), "MISSING"), None);
    }

    #[test]
    fn test_load_without_files() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.loaded_from, None);
    }
}
