//! Configuration model for grove.
//!
//! This module defines the Config struct that represents `grove.yaml` in
//! the store root. It supports forward-compatible YAML parsing (unknown
//! fields are ignored), sensible defaults for every field, and validation
//! of config values. A missing file means defaults.

use crate::error::{GroveError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the config file inside the store root.
pub const CONFIG_FILE: &str = "grove.yaml";

/// Configuration for a grove store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version-control binary driven by the execution core (default: "git").
    pub git_binary: String,

    /// Remote branch tracked when `--branch` is omitted (default: "main").
    pub remote_branch: String,

    /// Prefix used to derive local branch names (default: "grove").
    pub branch_prefix: String,

    /// Default operation deadline in seconds. Unset means unbounded.
    pub timeout_secs: Option<u64>,

    /// Log-line prefix for the child's stdout (default: "stdout> ").
    pub stdout_prefix: String,

    /// Log-line prefix for the child's stderr (default: "stderr> ").
    pub stderr_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git_binary: "git".to_string(),
            remote_branch: "main".to_string(),
            branch_prefix: "grove".to_string(),
            timeout_secs: None,
            stdout_prefix: "stdout> ".to_string(),
            stderr_prefix: "stderr> ".to_string(),
        }
    }
}

impl Config {
    /// Load and validate the config at `path`.
    ///
    /// A missing file yields the defaults; an unreadable or invalid file
    /// is a configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|e| {
            GroveError::ConfigError(format!("failed to read '{}': {}", path.display(), e))
        })?;

        let config: Config = serde_yaml::from_str(&raw).map_err(|e| {
            GroveError::ConfigError(format!("failed to parse '{}': {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values, returning an actionable error for the
    /// first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.git_binary.trim().is_empty() {
            return Err(GroveError::ConfigError(
                "git_binary must not be empty".to_string(),
            ));
        }
        if self.branch_prefix.trim().is_empty() {
            return Err(GroveError::ConfigError(
                "branch_prefix must not be empty".to_string(),
            ));
        }
        if self.timeout_secs == Some(0) {
            return Err(GroveError::ConfigError(
                "timeout_secs must be positive; omit it for no deadline".to_string(),
            ));
        }
        Ok(())
    }
}
