//! Per-promise execution records and the judgments rendered on them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutionRecord {
    pub promise_id: String,
    pub attempted: bool,
    pub observed: bool,
    pub skipped: bool,
    pub skip_reason: Option<String>,
}

impl ExecutionRecord {
    /// Attempted and not skipped: exactly one judgment must exist.
    pub fn requires_judgment(&self) -> bool {
        self.attempted && !self.skipped
    }
}

/// What a judgment claims about the promise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JudgmentOutcome {
    /// The promise was kept.
    Fulfilled,
    /// The promise was broken without feedback.
    SilentFailure,
    /// The promise could not be observed; no claim either way.
    Unobserved,
    Inconclusive,
}

impl JudgmentOutcome {
    pub fn claims_fulfilled(self) -> bool {
        matches!(self, Self::Fulfilled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Judgment {
    pub promise_id: String,
    /// Short label for the judgment (finding type or verdict name).
    #[serde(default)]
    pub judgment: Option<String>,
    pub outcome: JudgmentOutcome,
}
