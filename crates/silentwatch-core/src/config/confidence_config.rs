//! Confidence engine configuration.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_EXPLAIN_ITEMS;

/// `[confidence]` section. Per-call options override these.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Custom policy file. None = built-in default policy.
    pub policy_path: Option<String>,
    /// Directory relative policy paths resolve against.
    pub project_dir: Option<String>,
    /// Where the confidence report artifact is written.
    pub report_path: Option<String>,
    /// Cap on `explain` entries. Default: 8.
    pub max_explain_items: Option<usize>,
}

impl ConfidenceConfig {
    /// Returns the effective explain cap, never above the report limit.
    pub fn effective_max_explain_items(&self) -> usize {
        self.max_explain_items
            .unwrap_or(MAX_EXPLAIN_ITEMS)
            .clamp(1, MAX_EXPLAIN_ITEMS)
    }

    /// Returns the effective report path, defaulting to `confidence-report.json`.
    pub fn effective_report_path(&self) -> &str {
        self.report_path.as_deref().unwrap_or("confidence-report.json")
    }
}
