//! Configuration Management
//!
//! Handles persistent provider configuration: the Cloud API key pair and an
//! optional endpoint override.

use crate::ccloud::auth::Credentials;
use crate::ccloud::client::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Cloud API key
    #[serde(default)]
    pub api_key: Option<String>,
    /// Cloud API secret
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Management API endpoint override
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ccloud-provider").join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().context("No config directory available")?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(())
    }

    /// Get effective credentials (CLI > environment > config)
    pub fn effective_credentials(
        &self,
        cli_key: Option<&str>,
        cli_secret: Option<&str>,
    ) -> Result<Credentials> {
        if let (Some(key), Some(secret)) = (cli_key, cli_secret) {
            return Ok(Credentials::new(key, secret));
        }

        if let Some(credentials) = Credentials::from_env() {
            return Ok(credentials);
        }

        match (self.api_key.as_deref(), self.api_secret.as_deref()) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                Ok(Credentials::new(key, secret))
            }
            _ => Err(anyhow::anyhow!(
                "No Confluent Cloud credentials configured. Set {} and {} or run 'ccloud-provider configure'",
                crate::ccloud::auth::API_KEY_ENV,
                crate::ccloud::auth::API_SECRET_ENV
            )),
        }
    }

    /// Get effective endpoint (CLI > config > default)
    pub fn effective_endpoint(&self, cli_endpoint: Option<&str>) -> String {
        cli_endpoint
            .map(str::to_string)
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json"));
        assert!(config.api_key.is_none());
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            api_key: Some("KEY".into()),
            api_secret: Some("SECRET".into()),
            endpoint: Some("http://localhost:8080".into()),
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path);
        assert_eq!(loaded.api_key.as_deref(), Some("KEY"));
        assert_eq!(loaded.endpoint.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_from(&path).api_key.is_none());
    }

    #[test]
    fn test_cli_credentials_win() {
        let config = Config {
            api_key: Some("file-key".into()),
            api_secret: Some("file-secret".into()),
            endpoint: None,
        };
        let creds = config
            .effective_credentials(Some("cli-key"), Some("cli-secret"))
            .unwrap();
        assert_eq!(creds.key(), "cli-key");
    }

    #[test]
    fn test_effective_endpoint_precedence() {
        let config = Config {
            endpoint: Some("http://stub:1234".into()),
            ..Config::default()
        };
        assert_eq!(config.effective_endpoint(Some("http://cli:1")), "http://cli:1");
        assert_eq!(config.effective_endpoint(None), "http://stub:1234");
        assert_eq!(Config::default().effective_endpoint(None), DEFAULT_BASE_URL);
    }
}
