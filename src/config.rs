//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::adapters::live::env_credentials::EnvCredentials;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Default values used when the matching CLI flag is not given.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Gemini API key.
    pub gemini: Option<String>,
}

/// Default parameter values from config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default aspect ratio choice: `1:1`, `16:9`, `9:16` or `custom`.
    pub aspect_ratio: String,
    /// Default custom width in pixels.
    pub width: i64,
    /// Default custom height in pixels.
    pub height: i64,
    /// Directory for auto-named output files.
    pub output_dir: Option<PathBuf>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { aspect_ratio: "1:1".to_string(), width: 1024, height: 1024, output_dir: None }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Credential source: environment first, then the `[keys]` table.
    #[must_use]
    pub fn credentials(&self) -> EnvCredentials {
        EnvCredentials::new(self.keys.gemini.clone())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `PRODUCT_STUDIO_CONFIG` environment variable
/// 3. `~/.config/product-studio/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    if let Ok(p) = std::env::var("PRODUCT_STUDIO_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/product-studio/config.toml")
    } else {
        PathBuf::from("product-studio.toml")
    }
}
