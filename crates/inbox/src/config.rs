//! Backend connection settings
//!
//! Loaded from (in order of priority):
//! 1. JSON file (~/.config/skiff/backend.json)
//! 2. Runtime environment variables (fallback)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings filename in the Skiff config directory
const BACKEND_FILE: &str = "backend.json";

/// Connection settings for the mail-sync backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendSettings {
    /// Base URL of the mail-sync API (e.g., "http://localhost:8025")
    pub base_url: String,
    /// Optional bearer token attached to every request
    #[serde(default)]
    pub api_key: Option<String>,
}

impl BackendSettings {
    /// Load settings from the config file, falling back to the
    /// `SKIFF_BACKEND_URL` / `SKIFF_BACKEND_API_KEY` environment variables.
    pub fn load() -> Result<Self> {
        if config::config_exists(BACKEND_FILE) {
            return config::load_json(BACKEND_FILE);
        }
        Self::from_env()
    }

    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("SKIFF_BACKEND_URL")
            .context("SKIFF_BACKEND_URL environment variable not set")?;
        Ok(Self {
            base_url,
            api_key: std::env::var("SKIFF_BACKEND_API_KEY").ok(),
        })
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse backend settings JSON")
    }

    /// Save settings to the config file
    pub fn save(&self) -> Result<()> {
        config::save_json(BACKEND_FILE, self)
    }

    /// Check whether settings are available (file or env vars)
    pub fn is_available() -> bool {
        config::config_exists(BACKEND_FILE) || std::env::var("SKIFF_BACKEND_URL").is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let json = r#"{
            "baseUrl": "http://localhost:8025",
            "apiKey": "secret"
        }"#;

        let settings = BackendSettings::from_json(json).unwrap();
        assert_eq!(settings.base_url, "http://localhost:8025");
        assert_eq!(settings.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_api_key_optional() {
        let json = r#"{ "baseUrl": "http://localhost:8025" }"#;
        let settings = BackendSettings::from_json(json).unwrap();
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_invalid_json() {
        assert!(BackendSettings::from_json(r#"{ "other": true }"#).is_err());
    }
}
