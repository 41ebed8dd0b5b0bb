//! Before/after comparisons and evidence packages for a finding candidate.

use serde::{Deserialize, Serialize};

/// Differences observed between the before and after states of an interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comparisons {
    pub url_changed: bool,
    pub dom_changed: bool,
    pub screenshot_changed: bool,
    pub state_changed: bool,
    /// Whether the promised navigation target was reached. None = not checked.
    pub target_reached: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvidencePackage {
    pub before_screenshot: Option<String>,
    pub after_screenshot: Option<String>,
    pub before_url: Option<String>,
    pub after_url: Option<String>,
    pub dom_hash_before: Option<String>,
    pub dom_hash_after: Option<String>,
    pub is_complete: bool,
}

impl EvidencePackage {
    /// Whether anything at all was captured.
    pub fn is_populated(&self) -> bool {
        self.is_complete
            || self.before_screenshot.is_some()
            || self.after_screenshot.is_some()
            || self.before_url.is_some()
            || self.after_url.is_some()
            || self.dom_hash_before.is_some()
            || self.dom_hash_after.is_some()
    }

    pub fn has_screenshot_pair(&self) -> bool {
        self.before_screenshot.as_deref().is_some_and(|s| !s.is_empty())
            && self.after_screenshot.as_deref().is_some_and(|s| !s.is_empty())
    }

    pub fn url_changed(&self) -> bool {
        matches!((&self.before_url, &self.after_url), (Some(b), Some(a)) if a != b)
    }

    pub fn dom_changed(&self) -> bool {
        matches!((&self.dom_hash_before, &self.dom_hash_after), (Some(b), Some(a)) if a != b)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureFailure {
    pub kind: String,
    pub reason: String,
}

/// What evidence the pipeline meant to capture, and what went wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvidenceIntent {
    pub required: Vec<String>,
    pub captured: Vec<String>,
    pub failures: Vec<CaptureFailure>,
}

impl EvidenceIntent {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}
