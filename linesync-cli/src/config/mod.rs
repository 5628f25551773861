//! Configuration module
//!
//! Settings come from an optional `linesync.toml`. Every section and key is
//! optional; command-line flags override whatever the file sets.

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Synchronization defaults
    #[serde(default)]
    pub sync: SyncConfig,

    /// Inspection defaults
    #[serde(default)]
    pub analyze: AnalyzeConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Document storage
    #[serde(default)]
    pub store: StoreConfig,
}

/// Synchronization settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SyncConfig {
    /// Loop to resume from
    pub start_loop: usize,

    /// Run the deferred tab insertion pass
    pub insert_tabs: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            start_loop: 1,
            insert_tabs: true,
        }
    }
}

/// Inspection settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Number of lines reported by `analyze`
    pub max_lines: usize,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self { max_lines: 100 }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty print JSON documents and reports
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty_json: true }
    }
}

/// Where document ids and URLs are resolved
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding `<id>.json` documents, the working directory when unset
    pub directory: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine would refuse
    pub fn validate(&self) -> Result<(), CliError> {
        if self.sync.start_loop == 0 {
            return Err(CliError::ConfigError(
                "sync.start_loop must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
