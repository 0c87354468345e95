//! Shared configuration loading for Skiff
//!
//! Small helpers over JSON files in the Skiff config directory
//! (~/.config/skiff/). Crates define their own typed settings structs and
//! use [`load_json`]/[`save_json`] to move them in and out of that
//! directory.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Get the Skiff config directory (~/.config/skiff/)
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("skiff"))
}

/// Get the path of a file within the Skiff config directory
pub fn config_path(filename: &str) -> Option<PathBuf> {
    config_dir().map(|p| p.join(filename))
}

/// Check if a file exists in the Skiff config directory
pub fn config_exists(filename: &str) -> bool {
    config_path(filename).is_some_and(|p| p.exists())
}

/// Create the Skiff config directory if needed and return its path
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir().context("Could not determine config directory")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    Ok(dir)
}

/// Load and parse a JSON file from the Skiff config directory
pub fn load_json<T: DeserializeOwned>(filename: &str) -> Result<T> {
    let path = config_path(filename).context("Could not determine config directory")?;
    load_json_file(&path)
}

/// Load and parse a JSON file from an arbitrary path
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Serialize a value as pretty JSON into the Skiff config directory
pub fn save_json<T: Serialize>(filename: &str, value: &T) -> Result<()> {
    let dir = ensure_config_dir()?;
    let path = dir.join(filename);
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_under_skiff_dir() {
        let path = config_path("settings.json").unwrap();
        assert!(path.ends_with("skiff/settings.json"));
    }

    #[test]
    fn test_load_json_file_roundtrip() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Sample {
            name: String,
            count: u32,
        }

        let path = std::env::temp_dir().join("skiff-config-test.json");
        std::fs::write(&path, r#"{"name":"inbox","count":3}"#).unwrap();

        let sample: Sample = load_json_file(&path).unwrap();
        assert_eq!(sample.name, "inbox");
        assert_eq!(sample.count, 3);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_json_file_missing() {
        let path = std::env::temp_dir().join("skiff-config-does-not-exist.json");
        let result: Result<serde_json::Value> = load_json_file(&path);
        assert!(result.is_err());
    }
}
