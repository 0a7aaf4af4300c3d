// src/config.rs

//! Start-up settings.
//!
//! The prediction endpoint is resolved from, in order:
//! `RESPIRATORY_AI_PREDICT_URL`, `PREDICT_URL`, the `predict_url` key of
//! `<config dir>/config.json`, and finally the local development server.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::ConfigError;
use crate::logging::project_directory;

pub const PREDICT_URL_ENV: &str = "RESPIRATORY_AI_PREDICT_URL";
pub const FALLBACK_PREDICT_URL_ENV: &str = "PREDICT_URL";
pub const DEFAULT_PREDICT_URL: &str = "http://localhost:7000/predict";

/// Optional on-disk configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub predict_url: Option<String>,
    pub user_agent: Option<String>,
}

impl FileConfig {
    pub fn config_path() -> Option<PathBuf> {
        project_directory().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Reads `path`, or returns the default config when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Resolved settings used by the running client.
#[derive(Debug, Clone)]
pub struct Settings {
    pub predict_url: Url,
    pub user_agent: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let file = match FileConfig::config_path() {
            Some(path) => FileConfig::load_from(&path)?,
            None => FileConfig::default(),
        };
        let env_url = std::env::var(PREDICT_URL_ENV)
            .or_else(|_| std::env::var(FALLBACK_PREDICT_URL_ENV))
            .ok();
        Self::resolve(env_url, file)
    }

    /// Combines the environment override with the file config.
    pub fn resolve(env_url: Option<String>, file: FileConfig) -> Result<Self, ConfigError> {
        let raw = env_url
            .filter(|u| !u.trim().is_empty())
            .or(file.predict_url)
            .unwrap_or_else(|| DEFAULT_PREDICT_URL.to_string());
        let predict_url = parse_predict_url(raw.trim())?;
        let user_agent = file
            .user_agent
            .unwrap_or_else(|| format!("RespiratoryAI/{}", env!("CARGO_PKG_VERSION")));

        info!(url = %predict_url, "Prediction endpoint configured.");
        debug!(user_agent = %user_agent, "HTTP user agent.");
        Ok(Self {
            predict_url,
            user_agent,
        })
    }
}

fn parse_predict_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_url() {
        let settings = Settings::resolve(None, FileConfig::default()).unwrap();
        assert_eq!(settings.predict_url.as_str(), DEFAULT_PREDICT_URL);
        assert!(settings.user_agent.starts_with("RespiratoryAI/"));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig {
            predict_url: Some("http://file.example/predict".to_string()),
            user_agent: None,
        };
        let settings =
            Settings::resolve(Some("https://env.example/predict".to_string()), file).unwrap();
        assert_eq!(settings.predict_url.as_str(), "https://env.example/predict");
    }

    #[test]
    fn test_blank_env_falls_back_to_file() {
        let file = FileConfig {
            predict_url: Some("http://file.example/predict".to_string()),
            user_agent: Some("custom".to_string()),
        };
        let settings = Settings::resolve(Some("  ".to_string()), file).unwrap();
        assert_eq!(settings.predict_url.as_str(), "http://file.example/predict");
        assert_eq!(settings.user_agent, "custom");
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            Settings::resolve(Some("not a url".to_string()), FileConfig::default()),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            Settings::resolve(Some("ftp://host/predict".to_string()), FileConfig::default()),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.predict_url.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"predict_url": "http://10.0.0.2:7000/predict", "extra": 1}"#).unwrap();
        let config = FileConfig::load_from(&path).unwrap();
        assert_eq!(config.predict_url.as_deref(), Some("http://10.0.0.2:7000/predict"));
    }

    #[test]
    fn test_load_from_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{").unwrap();
        assert!(matches!(FileConfig::load_from(&path), Err(ConfigError::Json(_))));
    }
}
