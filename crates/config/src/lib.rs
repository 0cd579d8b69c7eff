//! Configuration loading, validation, and management for SWMTrack.
//!
//! Loads configuration from `~/.swmtrack/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.swmtrack/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Narrator service configuration
    #[serde(default)]
    pub narrator: NarratorConfig,
}

/// Settings for the Gemini narrator backend.
#[derive(Clone, Serialize, Deserialize)]
pub struct NarratorConfig {
    /// Gemini API key (usually set via environment instead)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL (override for proxies or testing)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-1.5-flash".into()
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_timeout_secs() -> u64 {
    60
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for NarratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarratorConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.swmtrack/config.toml).
    ///
    /// Also checks environment variables for the API key:
    /// - `SWMTRACK_GEMINI_API_KEY` (highest priority)
    /// - `GEMINI_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if let Ok(key) = std::env::var("SWMTRACK_GEMINI_API_KEY") {
            config.narrator.api_key = Some(key);
        } else if config.narrator.api_key.is_none() {
            config.narrator.api_key = std::env::var("GEMINI_API_KEY").ok();
        }

        if let Ok(model) = std::env::var("SWMTRACK_MODEL") {
            config.narrator.model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".swmtrack")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.narrator.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "narrator.timeout_secs must be greater than 0".into(),
            ));
        }
        if !self.narrator.base_url.starts_with("http") {
            return Err(ConfigError::ValidationError(
                "narrator.base_url must be an http(s) URL".into(),
            ));
        }
        if self.narrator.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "narrator.model must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.narrator.api_key.is_some()
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.narrator.model, "gemini-1.5-flash");
        assert_eq!(config.narrator.timeout_secs, 60);
        assert!(config.narrator.api_key.is_none());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.narrator.model, config.narrator.model);
        assert_eq!(parsed.narrator.base_url, config.narrator.base_url);
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.narrator.model, "gemini-1.5-flash");
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.narrator.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[narrator]\nmodel = \"gemini-1.5-pro\"").unwrap();
        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.narrator.model, "gemini-1.5-pro");
        assert_eq!(config.narrator.timeout_secs, 60);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "narrator = not toml").unwrap();
        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn debug_never_prints_api_key() {
        let mut config = AppConfig::default();
        config.narrator.api_key = Some("super-secret".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("gemini-1.5-flash"));
        assert!(toml_str.contains("timeout_secs"));
    }
}
