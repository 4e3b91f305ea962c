//! Application configuration loaded from `config.toml` in the app directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::app_dirs;
use crate::sentiment::api::SentimentModel;

/// Filename of the configuration file under the app root.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Settings the app reads at startup. A missing file yields the defaults; a
/// malformed file is an error so typos do not silently fall back.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub defaults: DefaultSettings,
}

/// Where the sentiment service lives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL the predict endpoint is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Initial UI selections.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultSettings {
    /// Model variant preselected in the picker.
    #[serde(default)]
    pub model: SentimentModel,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

/// Errors that can occur while locating, reading or validating the config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No suitable base config directory available")]
    NoConfigDir,
    #[error("Failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid backend base URL '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },
}

impl AppConfig {
    /// Parse and validate the configured backend base URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.backend.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            value: self.backend.base_url.clone(),
            source,
        })
    }
}

/// Path of the config file inside the app root directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let root = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(root.join(CONFIG_FILE_NAME))
}

/// Load the config, falling back to defaults when no file exists yet.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    load_from(&path)
}

fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let bytes = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&bytes).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => ConfigError::CreateDir { path, source },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_when_no_file_exists() {
        let dir = tempdir().unwrap();
        let _guard = crate::app_dirs::ConfigBaseGuard::set(dir.path().to_path_buf());
        let cfg = load_or_default().unwrap();
        assert_eq!(cfg.backend.base_url, "http://localhost:8000");
        assert_eq!(cfg.defaults.model, SentimentModel::Lstm);
    }

    #[test]
    fn reads_settings_from_toml() {
        let dir = tempdir().unwrap();
        let _guard = crate::app_dirs::ConfigBaseGuard::set(dir.path().to_path_buf());
        let path = config_path().unwrap();
        std::fs::write(
            &path,
            "[backend]\nbase_url = \"http://10.0.0.7:9001\"\n\n[defaults]\nmodel = \"rnn\"\n",
        )
        .unwrap();

        let cfg = load_or_default().unwrap();
        assert_eq!(cfg.backend.base_url, "http://10.0.0.7:9001");
        assert_eq!(cfg.defaults.model, SentimentModel::Rnn);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempdir().unwrap();
        let _guard = crate::app_dirs::ConfigBaseGuard::set(dir.path().to_path_buf());
        std::fs::write(config_path().unwrap(), "[defaults]\nmodel = \"rnn\"\n").unwrap();

        let cfg = load_or_default().unwrap();
        assert_eq!(cfg.backend.base_url, "http://localhost:8000");
        assert_eq!(cfg.defaults.model, SentimentModel::Rnn);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let _guard = crate::app_dirs::ConfigBaseGuard::set(dir.path().to_path_buf());
        std::fs::write(config_path().unwrap(), "backend = 3\n").unwrap();
        let err = load_or_default().unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn invalid_base_url_is_rejected_on_use() {
        let cfg = AppConfig {
            backend: BackendSettings {
                base_url: "not a url".to_string(),
            },
            defaults: DefaultSettings::default(),
        };
        assert!(matches!(
            cfg.base_url(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn valid_base_url_parses() {
        let cfg = AppConfig::default();
        let url = cfg.base_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/");
    }
}
