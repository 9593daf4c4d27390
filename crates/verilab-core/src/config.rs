//! Editor configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[serde(default)]` fills every missing field from `Default::default()`,
//! so a config file only needs the keys a user wants to change.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::widget::{EditorTheme, SyntaxMode};

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compile/simulate backend
    pub backend: BackendConfig,

    /// Editor appearance
    pub editor: EditorConfig,

    /// How submission results are attributed to tabs
    pub submission: SubmissionConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default config: {}", e);
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads from the default config path.
    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("verilab").join("config.toml"))
    }

    /// Saves the config to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path()?)
    }

    /// Saves the config to a file, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL; `/run` and `/` are resolved against it
    pub url: String,

    /// Timeout for a compile/simulate request
    pub request_timeout_secs: u64,

    /// Timeout for the liveness probe
    pub probe_timeout_secs: u64,

    /// Probe the backend when the editor starts
    pub probe_on_startup: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000".to_string(),
            request_timeout_secs: 60,
            probe_timeout_secs: 5,
            probe_on_startup: true,
        }
    }
}

/// Editor appearance settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub theme: EditorTheme,

    /// Font size in points
    pub font_size: f32,

    /// Wrap long lines
    pub wrap: bool,

    pub syntax: SyntaxMode,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            theme: EditorTheme::Monokai,
            font_size: 14.0,
            wrap: true,
            syntax: SyntaxMode::Verilog,
        }
    }
}

/// Submission settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub attribution: AttributionPolicy,
}

/// Which tab receives a late-arriving submission result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionPolicy {
    /// The tab the code was sent from
    #[default]
    Originating,
    /// Whichever tab is active when the result arrives
    ActiveTab,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend.url, "http://localhost:5000");
        assert_eq!(config.editor.theme, EditorTheme::Monokai);
        assert_eq!(config.submission.attribution, AttributionPolicy::Originating);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file() {
        let parsed: Config = toml::from_str(
            r#"
            [backend]
            url = "http://sim.local:8080"

            [submission]
            attribution = "active_tab"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.backend.url, "http://sim.local:8080");
        assert_eq!(parsed.backend.request_timeout_secs, 60);
        assert_eq!(parsed.submission.attribution, AttributionPolicy::ActiveTab);
        assert_eq!(parsed.editor.syntax, SyntaxMode::Verilog);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.editor.theme = EditorTheme::Github;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_bad_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backend = 3").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
    }
}
