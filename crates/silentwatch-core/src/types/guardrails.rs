//! External guardrails adjustment for a single finding.

use serde::{Deserialize, Serialize};

use super::truth_status::TruthStatus;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuardrailsOutcome {
    /// When true, overrides every other confidence derivation for the finding.
    pub downgraded: bool,
    pub confidence_delta: f64,
    pub final_decision: Option<TruthStatus>,
    pub recommended_status: Option<TruthStatus>,
}

impl GuardrailsOutcome {
    /// The status guardrails settled on; `finalDecision` wins over `recommendedStatus`.
    pub fn decision(&self) -> Option<TruthStatus> {
        self.final_decision.or(self.recommended_status)
    }

    pub fn has_delta(&self) -> bool {
        self.confidence_delta.is_finite() && self.confidence_delta != 0.0
    }
}
