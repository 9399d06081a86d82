//! Configuration management
//!
//! Settings live in `settings.json` inside the billdesk directory:
//! ```json
//! {
//!   "apiBaseUrl": "http://localhost:8080/api",
//!   "requestTimeoutSecs": 30
//! }
//! ```
//! Keys this crate does not manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Backend used when nothing is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Environment variable overriding the backend base URL
pub const API_URL_ENV: &str = "BILLDESK_API_URL";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Billdesk configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, without trailing slash
    pub api_base_url: String,
    /// Client-wide request timeout; `None` keeps the HTTP client default
    pub request_timeout: Option<Duration>,
    /// Configured base URL that failed validation and was replaced by the default
    pub rejected_base_url: Option<String>,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: None,
            rejected_base_url: None,
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the billdesk directory
    ///
    /// The base URL can be overridden with `BILLDESK_API_URL`. An invalid
    /// base URL falls back to [`DEFAULT_API_BASE_URL`] and is kept in
    /// `rejected_base_url`, so `set_api_base_url` can still repair it.
    pub fn load(app_dir: &Path) -> Result<Self> {
        let settings_path = app_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let configured = std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| raw.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let (api_base_url, rejected_base_url) = match normalize_base_url(&configured) {
            Ok(url) => (url, None),
            Err(_) => (DEFAULT_API_BASE_URL.to_string(), Some(configured)),
        };

        Ok(Self {
            api_base_url,
            request_timeout: raw.request_timeout_secs.map(Duration::from_secs),
            rejected_base_url,
            _raw_settings: raw,
        })
    }

    /// Save config to the billdesk directory
    /// Preserves other settings that the CLI doesn't manage
    pub fn save(&self, app_dir: &Path) -> Result<()> {
        let settings_path = app_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.api_base_url = Some(self.api_base_url.clone());
        settings.request_timeout_secs = self.request_timeout.map(|d| d.as_secs());

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Point the client at another backend
    pub fn set_api_base_url(&mut self, url: &str) -> Result<()> {
        self.api_base_url = normalize_base_url(url)?;
        self.rejected_base_url = None;
        Ok(())
    }
}

/// Validate an http(s) base URL and trim its trailing slash
pub fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim();
    let parsed = Url::parse(trimmed).with_context(|| format!("Invalid API base URL: {}", trimmed))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("API base URL must use http or https");
    }
    if parsed.host_str().is_none() {
        anyhow::bail!("API base URL must include a host");
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
