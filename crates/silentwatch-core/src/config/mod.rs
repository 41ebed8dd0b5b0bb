//! Configuration for the silentwatch engine, loaded from `silentwatch.toml`.

pub mod confidence_config;
pub mod observability_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use confidence_config::ConfidenceConfig;
pub use observability_config::ObservabilityConfig;

use crate::constants::DEFAULT_CONFIG_FILE;
use crate::errors::{ConfigError, ConfigResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SilentwatchConfig {
    pub confidence: ConfidenceConfig,
    pub observability: ObservabilityConfig,
}

impl SilentwatchConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load config from a file. A missing file is an error; callers that want
    /// defaults when no file exists should check for it first.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&raw).map_err(|source| ConfigError::TomlParse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `silentwatch.toml` from a project directory. No file means
    /// defaults; a file that is present but broken is an error.
    pub fn from_project_dir(dir: &Path) -> ConfigResult<Self> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject settings that parse but cannot be honoured.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.confidence.max_explain_items == Some(0) {
            return Err(ConfigError::Invalid(
                "confidence.max_explain_items must be at least 1".to_string(),
            ));
        }
        if let Some(path) = &self.confidence.policy_path {
            if path.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "confidence.policy_path must not be empty when set".to_string(),
                ));
            }
        }
        Ok(())
    }
}
