//! Rune Layers configuration system
//!
//! Settings for the layer composer and the `rune-layers` tool, loaded from
//! `rune-layers.toml` with environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "rune-layers.toml";

/// Main configuration structure for Rune Layers
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LayersConfig {
    /// Comma-separated diagnostics categories (`style`, `compose`, `all`)
    pub diagnostics: Option<String>,
    /// Composer settings
    pub compose: ComposeConfig,
    /// Output settings for the snapshot tool
    pub snapshot: SnapshotConfig,
}

/// Composer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Host primitive the animatable containers are built from
    pub base_container: String,
}

/// Snapshot tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Print the bucket of every style key instead of the wrapped tree
    pub classify: bool,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            base_container: "View".to_string(),
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            classify: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl LayersConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from the default location or return default
    /// configuration if the file doesn't exist or can't be parsed
    pub fn load_or_default() -> Self {
        Self::load_from_file(CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        if let Ok(name) = std::env::var("RUNE_LAYERS_BASE_CONTAINER") {
            if !name.trim().is_empty() {
                self.compose.base_container = name.trim().to_string();
            }
        }
        if let Ok(val) = std::env::var("RUNE_LAYERS_PRETTY") {
            self.snapshot.pretty = env_flag(&val);
        }
        if let Ok(val) = std::env::var("RUNE_LAYERS_CLASSIFY") {
            self.snapshot.classify = env_flag(&val);
        }
        if let Ok(diagnostics) = std::env::var("RUNE_DIAGNOSTICS") {
            self.diagnostics = Some(diagnostics);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from rune-layers.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayersConfig::default();
        assert_eq!(config.compose.base_container, "View");
        assert!(config.snapshot.pretty);
        assert!(!config.snapshot.classify);
        assert!(config.diagnostics.is_none());
    }

    #[test]
    fn test_toml_serialization() {
        let config = LayersConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: LayersConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.compose.base_container, "View");
        assert!(parsed.snapshot.pretty);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[snapshot]\nclassify = true\n").unwrap();

        let config = LayersConfig::load_from_file(&path).unwrap();
        assert!(config.snapshot.classify);
        assert!(config.snapshot.pretty);
        assert_eq!(config.compose.base_container, "View");
    }

    #[test]
    fn test_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = LayersConfig::load_from_file(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[compose\nbase_container = 1").unwrap();
        let err = LayersConfig::load_from_file(&broken).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("RUNE_LAYERS_BASE_CONTAINER", "Surface");
            std::env::set_var("RUNE_LAYERS_PRETTY", "false");
            std::env::set_var("RUNE_LAYERS_CLASSIFY", "1");
            std::env::set_var("RUNE_DIAGNOSTICS", "compose");
        }

        let mut config = LayersConfig::default();
        config.merge_with_env();

        assert_eq!(config.compose.base_container, "Surface");
        assert!(!config.snapshot.pretty);
        assert!(config.snapshot.classify);
        assert_eq!(config.diagnostics.as_deref(), Some("compose"));

        unsafe {
            std::env::remove_var("RUNE_LAYERS_BASE_CONTAINER");
            std::env::remove_var("RUNE_LAYERS_PRETTY");
            std::env::remove_var("RUNE_LAYERS_CLASSIFY");
            std::env::remove_var("RUNE_DIAGNOSTICS");
        }
    }
}
