//! Logging configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// EnvFilter directive. Default: "info".
    pub log_level: Option<String>,
    /// Emit JSON lines instead of human-readable output. Default: false.
    pub json: Option<bool>,
}

impl ObservabilityConfig {
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn effective_json(&self) -> bool {
        self.json.unwrap_or(false)
    }
}
