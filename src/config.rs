//! Configuration management for Recast.
//!
//! Handles loading configuration from TOML files, with support for named
//! normalization profiles that pin an id column and default report metadata.

use crate::error::{RecastError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main configuration structure for Recast.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Report output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Named normalization profiles.
    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Pretty-print reports instead of emitting compact JSON.
    #[serde(default)]
    pub pretty: bool,
}

/// A named normalization profile.
///
/// Profiles capture per-database conventions so they do not have to be
/// repeated on every invocation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileConfig {
    /// Column inserted ids are read from, instead of the first column of
    /// each returned row.
    pub id_column: Option<String>,

    /// Metadata attached to every report produced under this profile.
    pub meta: Option<JsonValue>,
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("db-recast")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            RecastError::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            RecastError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Gets a named profile, or the default profile if name is None.
    pub fn get_profile(&self, name: Option<&str>) -> Option<&ProfileConfig> {
        let key = name.unwrap_or("default");
        self.profiles.get(key)
    }
}
