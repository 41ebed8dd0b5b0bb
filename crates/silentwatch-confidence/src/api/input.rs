//! `computeConfidence` parameters, as the collaborators send them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use silentwatch_core::types::{
    AttemptMeta, Comparisons, DeterminismVerdict, EvidenceIntent, EvidencePackage, Expectation, FindingType,
    GuardrailsOutcome, Sensors, VerificationStatus,
};
use silentwatch_core::TruthStatus;

use crate::scoring::ScoringInput;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfidenceOptions {
    /// Overrides `[confidence].policy_path` for this call.
    pub policy_path: Option<PathBuf>,
    pub project_dir: Option<PathBuf>,
    pub determinism_verdict: Option<DeterminismVerdict>,
    pub verification_status: Option<VerificationStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfidenceInput {
    pub finding_type: FindingType,
    pub expectation: Option<Expectation>,
    pub sensors: Sensors,
    pub comparisons: Comparisons,
    pub attempt_meta: AttemptMeta,
    pub evidence: Option<EvidencePackage>,
    pub evidence_intent: Option<EvidenceIntent>,
    pub guardrails_outcome: Option<GuardrailsOutcome>,
    pub truth_status: Option<TruthStatus>,
    pub options: ConfidenceOptions,
}

impl ConfidenceInput {
    pub fn new(finding_type: FindingType) -> Self {
        Self {
            finding_type,
            ..Default::default()
        }
    }

    /// Whether any input that only the enhanced pipeline reads was supplied.
    /// Without one, the legacy result is returned unchanged.
    pub fn needs_enrichment(&self) -> bool {
        self.evidence_intent.is_some()
            || self.guardrails_outcome.is_some()
            || self.truth_status.is_some()
            || self.evidence.as_ref().is_some_and(EvidencePackage::is_populated)
    }

    pub fn expectation_unproven(&self) -> bool {
        self.expectation.as_ref().is_some_and(Expectation::is_unproven)
    }

    pub(crate) fn scoring_input(&self) -> ScoringInput<'_> {
        ScoringInput {
            finding_type: self.finding_type,
            expectation: self.expectation.as_ref(),
            sensors: &self.sensors,
            comparisons: &self.comparisons,
            attempt: &self.attempt_meta,
        }
    }
}
