//! Enhanced result and the canonical output shape, plus the boundary
//! adapter between them.

use serde::Serialize;
use silentwatch_core::types::ConfidenceLevel;
use silentwatch_core::{Confidence, TruthStatus};

use crate::explanation::ConfidenceExplanation;
use crate::invariants::{InvariantCode, InvariantViolation};
use crate::policy::AppliedPolicy;
use crate::reason_codes::ReasonCode;
use crate::scoring::engine::{HIGH_THRESHOLD, MEDIUM_THRESHOLD};
use crate::scoring::{LegacyScore, ScoreFactors};

/// Output of the enhanced pipeline. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceResult {
    pub confidence_before: Confidence,
    pub confidence_after: Confidence,
    pub confidence_level: Option<ConfidenceLevel>,
    pub applied_invariants: Vec<InvariantCode>,
    pub invariant_violations: Vec<InvariantViolation>,
    pub reason_codes: Vec<ReasonCode>,
    pub explanation: ConfidenceExplanation,
    pub top_reasons: Vec<String>,
    pub truth_status: TruthStatus,
    pub applied_policy: AppliedPolicy,
}

/// The canonical `computeConfidence` output.
///
/// The first four fields are the legacy shape; everything after them is
/// empty or absent on the legacy path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceOutput {
    pub score: u8,
    pub level: ConfidenceLevel,
    pub explain: Vec<String>,
    pub factors: ScoreFactors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_explanation: Option<ConfidenceExplanation>,
    pub applied_invariants: Vec<InvariantCode>,
    pub invariant_violations: Vec<InvariantViolation>,
    pub reason_codes: Vec<ReasonCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truth_status: Option<TruthStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_policy: Option<AppliedPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_before: Option<Confidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_after: Option<Confidence>,
}

impl ConfidenceOutput {
    /// Legacy result, passed through unchanged.
    pub fn from_legacy(legacy: LegacyScore) -> Self {
        Self {
            score: legacy.score,
            level: legacy.level,
            explain: legacy.explain,
            factors: legacy.factors,
            confidence_explanation: None,
            applied_invariants: Vec::new(),
            invariant_violations: Vec::new(),
            reason_codes: Vec::new(),
            truth_status: None,
            applied_policy: None,
            confidence_before: None,
            confidence_after: None,
        }
    }

    /// Map an enhanced result back into the legacy 0–100 shape.
    pub fn from_enhanced(legacy: LegacyScore, result: ConfidenceResult, max_explain: usize) -> Self {
        let score = result.confidence_after.to_score();
        let level = result.confidence_level.unwrap_or_else(|| level_for_score(score));

        let explain = if !result.reason_codes.is_empty() {
            result.reason_codes.iter().map(|c| c.as_str().to_string()).collect()
        } else if !result.top_reasons.is_empty() {
            result.top_reasons
        } else if !result.explanation.why_this_confidence.is_empty() {
            vec![result.explanation.why_this_confidence.clone()]
        } else {
            legacy.explain
        };

        Self {
            score,
            level,
            explain: explain.into_iter().take(max_explain).collect(),
            factors: legacy.factors,
            confidence_explanation: Some(result.explanation),
            applied_invariants: result.applied_invariants,
            invariant_violations: result.invariant_violations,
            reason_codes: result.reason_codes,
            truth_status: Some(result.truth_status),
            applied_policy: Some(result.applied_policy),
            confidence_before: Some(result.confidence_before),
            confidence_after: Some(result.confidence_after),
        }
    }
}

/// Score-only level derivation on the legacy thresholds.
pub fn level_for_score(score: u8) -> ConfidenceLevel {
    let score = u32::from(score);
    if score >= HIGH_THRESHOLD {
        ConfidenceLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}
