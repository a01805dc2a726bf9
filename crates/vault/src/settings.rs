//! Client settings for reaching the archive server
//!
//! Loaded from (in order of priority):
//! 1. JSON file (~/.config/mailvault/client.json)
//! 2. Runtime environment variables
//! 3. Built-in defaults (a server on localhost)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Settings filename in the MailVault config directory
const SETTINGS_FILE: &str = "client.json";

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the archive server lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL the endpoint paths are appended to
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientSettings {
    /// Load settings using the following priority:
    /// 1. JSON file (~/.config/mailvault/client.json)
    /// 2. Runtime environment variables
    /// 3. Defaults
    pub fn load() -> Result<Self> {
        if config::config_exists(SETTINGS_FILE) {
            let settings: Self = config::load_json(SETTINGS_FILE)?;
            settings.validate()?;
            return Ok(settings);
        }

        let settings = Self::from_env()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let settings: Self = config::load_json_file(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(json).context("Failed to parse client settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read `MAILVAULT_SERVER_URL` / `MAILVAULT_TIMEOUT_SECS`, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::default();

        if let Ok(url) = std::env::var("MAILVAULT_SERVER_URL") {
            settings.server_url = url;
        }

        if let Ok(secs) = std::env::var("MAILVAULT_TIMEOUT_SECS") {
            settings.timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("MAILVAULT_TIMEOUT_SECS is not a number: {}", secs))?;
        }

        Ok(settings)
    }

    /// Parsed and checked server URL
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(self.server_url.trim())
            .with_context(|| format!("Invalid server URL: {}", self.server_url))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => anyhow::bail!("Unsupported server URL scheme: {}", other),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the default settings file path (~/.config/mailvault/client.json)
    pub fn default_settings_path() -> Option<PathBuf> {
        config::config_path(SETTINGS_FILE)
    }

    fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        Ok(())
    }
}
