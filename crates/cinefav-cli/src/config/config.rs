//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use cinefav_tui::Locale;
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable that overrides `provider.api_key`.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Movie metadata provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// UI settings.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Provider configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    /// OMDb API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL override (default: the public OMDb endpoint).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// UI configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UiConfig {
    /// Language of user-visible messages.
    #[serde(default)]
    pub locale: Locale,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Picks the API key: a non-blank `from_env` wins over the config file.
    #[must_use]
    pub fn resolve_api_key(&self, from_env: Option<String>) -> Option<String> {
        let usable = |key: &String| !key.trim().is_empty();
        from_env
            .filter(usable)
            .or_else(|| self.provider.api_key.clone().filter(usable))
    }

    /// Parses the configured base URL, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if `provider.base_url` is not a valid URL.
    pub fn base_url(&self) -> Result<Option<Url>> {
        self.provider
            .base_url
            .as_deref()
            .map(|raw| Url::parse(raw).with_context(|| format!("invalid provider.base_url: {raw}")))
            .transpose()
    }
}
