//! Configuration system for PopForge.
//!
//! Load enumeration configuration from TOML or YAML files to control
//! normalization and exhaustive generation without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use popforge_config::PopForgeConfig;
//!
//! let config = PopForgeConfig::from_toml_str(r#"
//!     log_filter = "popforge=debug"
//!
//!     [normalization]
//!     tolerance = 1e-6
//!
//!     [exhaustive]
//!     trial_limit = 500
//!     prefetch = 16
//! "#).unwrap();
//!
//! assert_eq!(config.exhaustive.trial_limit, Some(500));
//! assert_eq!(config.normalization.tolerance, 1e-6);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use popforge_config::PopForgeConfig;
//!
//! let config = PopForgeConfig::load("popforge.toml").unwrap_or_default();
//! assert!(config.exhaustive.trial_limit.is_none());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main PopForge configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PopForgeConfig {
    /// Tracing filter directive, e.g. `"popforge_ranking=trace"`.
    #[serde(default)]
    pub log_filter: Option<String>,

    /// Probability normalization applied before enumeration.
    #[serde(default)]
    pub normalization: NormalizationConfig,

    /// Exhaustive generation settings.
    #[serde(default)]
    pub exhaustive: ExhaustiveConfig,
}

impl PopForgeConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Caps the number of generated assignments.
    pub fn with_trial_limit(mut self, limit: u64) -> Self {
        self.exhaustive.trial_limit = Some(limit);
        self
    }

    /// Sets how many ranked combinations each set type prepares up front.
    pub fn with_prefetch(mut self, prefetch: usize) -> Self {
        self.exhaustive.prefetch = prefetch;
        self
    }

    /// Sets the normalization tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.normalization.tolerance = tolerance;
        self
    }

    /// Sets the tracing filter directive.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Checks value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tolerance = self.normalization.tolerance;
        if !tolerance.is_finite() || !(0.0..1.0).contains(&tolerance) {
            return Err(ConfigError::Invalid(format!(
                "normalization tolerance must be in [0, 1), got {tolerance}"
            )));
        }
        if self.exhaustive.trial_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "exhaustive trial_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Probability normalization configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct NormalizationConfig {
    /// Distance from 1 within which a sum counts as normalized.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Reorder candidate lists by non-increasing probability.
    #[serde(default = "default_true")]
    pub sort_candidates: bool,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            sort_candidates: true,
        }
    }
}

/// Exhaustive generation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExhaustiveConfig {
    /// Maximum number of assignments to generate (None = all).
    #[serde(default)]
    pub trial_limit: Option<u64>,

    /// Ranked combinations each set type materializes at construction.
    #[serde(default)]
    pub prefetch: usize,
}

fn default_tolerance() -> f64 {
    1e-9
}

fn default_true() -> bool {
    true
}
