//! Enhanced pipeline: policy blend, guardrails, truth locks, truth status,
//! evidence law, one enforcer pass, then the audit artifacts.

use silentwatch_core::types::{ConfidenceLevel, DeterminismVerdict, GuardrailsOutcome};
use silentwatch_core::{Confidence, TruthStatus};
use tracing::debug;

use super::input::ConfidenceInput;
use super::output::ConfidenceResult;
use crate::evidence_law::{self, has_substantive_evidence};
use crate::explanation::{explain, ExplanationInputs};
use crate::invariants::{enforce, EnforcementContext, InvariantCode};
use crate::policy::{ConfidencePolicy, Thresholds};
use crate::reason_codes::{generate, ReasonInputs};
use crate::scoring::LegacyScore;

/// Factor values fed to the policy weights, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendFactors {
    pub promise_strength: f64,
    pub observation_strength: f64,
    pub correlation_quality: f64,
    pub guardrails: f64,
    pub evidence_completeness: f64,
}

impl BlendFactors {
    pub fn weighted(&self, policy: &ConfidencePolicy) -> Confidence {
        let w = policy.weights();
        let blended = w.promise_strength * self.promise_strength
            + w.observation_strength * self.observation_strength
            + w.correlation_quality * self.correlation_quality
            + w.guardrails * self.guardrails
            + w.evidence_completeness * self.evidence_completeness;
        Confidence::from_f64(blended)
    }
}

pub(crate) fn run(input: &ConfidenceInput, legacy: &LegacyScore, policy: &ConfidencePolicy) -> ConfidenceResult {
    let strength = legacy.factors.expectation_strength;
    let presence = legacy.factors.sensors_present;
    let guardrails = input.guardrails_outcome.as_ref();
    let locks = policy.truth_locks();
    let evidence_complete = input.evidence.as_ref().map(|e| e.is_complete);
    let substantive = has_substantive_evidence(input.evidence.as_ref(), &input.comparisons, &input.sensors);
    let capture_failures = input.evidence_intent.as_ref().map_or(0, |i| i.failure_count());
    let non_deterministic = input.options.determinism_verdict == Some(DeterminismVerdict::NonDeterministic);
    let expectation_unproven = input.expectation_unproven();

    let factors = BlendFactors {
        promise_strength: policy.base_score_for(strength),
        observation_strength: presence.present_channels().len() as f64 / 3.0,
        correlation_quality: f64::from(legacy.score) / 100.0,
        guardrails: guardrails_factor(guardrails),
        evidence_completeness: match evidence_complete {
            Some(true) => 1.0,
            _ if substantive => 0.5,
            _ => 0.0,
        },
    };
    let mut confidence = factors.weighted(policy);

    let mut applied = Vec::new();
    // Set when any ceiling holds for this finding, whether or not it lowered
    // the value. The status then has to follow the confidence down.
    let mut capped = false;

    if let Some(g) = guardrails {
        confidence = confidence.offset(g.confidence_delta);
        if g.downgraded {
            capped = true;
            if confidence > locks.guardrails_cap() {
                confidence = locks.guardrails_cap();
                applied.push(InvariantCode::GuardrailsNegativeCap);
            }
        }
    }
    // Checked after the delta so a positive adjustment cannot lift past it.
    if let Some(score) = legacy.observed_ceiling {
        capped = true;
        let ceiling = Confidence::from_score(score);
        if confidence > ceiling {
            confidence = ceiling;
            applied.push(InvariantCode::ObservedExpectationCap);
        }
    }
    let confidence_before = confidence;

    if non_deterministic {
        capped = true;
        if confidence > locks.non_deterministic_cap() {
            confidence = locks.non_deterministic_cap();
            applied.push(InvariantCode::NonDeterministicCap);
        }
    }
    if locks.evidence_complete_required && evidence_complete == Some(false) {
        capped = true;
        if confidence > locks.incomplete_evidence_cap() {
            confidence = locks.incomplete_evidence_cap();
            applied.push(InvariantCode::EvidenceCompletenessCap);
        }
    }

    let downgrade_decision = guardrails.filter(|g| g.downgraded).and_then(GuardrailsOutcome::decision);
    let mut status = input
        .truth_status
        .or(downgrade_decision)
        .unwrap_or_else(|| TruthStatus::for_confidence(confidence));
    // The range correction must not lift a capped value back over its ceiling.
    if capped && confidence < status.min_confidence() {
        status = status.min(TruthStatus::for_confidence(confidence));
    }

    let law = evidence_law::apply(status, substantive);
    status = law.status;
    applied.extend(law.invariant());

    let ctx = EnforcementContext {
        expectation_unproven,
        verification_status: input.options.verification_status,
        guardrails_decision: downgrade_decision,
    };
    let enforcement = enforce(confidence, status, &ctx);
    applied.extend(enforcement.violations.iter().map(|v| v.code));
    let confidence_after = enforcement.corrected_confidence;
    let status = enforcement.corrected_status;

    let level = threshold_level(confidence_after, policy.thresholds()).min(legacy.level);

    let reason_codes = generate(&ReasonInputs {
        strength,
        expectation_unproven,
        presence,
        evidence_complete,
        substantive_evidence: substantive,
        capture_failures,
        guardrails,
        applied_invariants: &applied,
    });

    let explained = explain(&ExplanationInputs {
        status,
        confidence: confidence_after,
        strength,
        expectation_unproven,
        presence,
        evidence_complete,
        substantive_evidence: substantive,
        guardrails,
        capture_failures,
        invariant_count: applied.len(),
        non_deterministic,
        non_deterministic_cap: locks.non_deterministic_cap(),
        evidence_law_note: law.note(),
    });

    debug!(
        finding_type = %input.finding_type,
        policy_version = policy.version(),
        before = %confidence_before,
        after = %confidence_after,
        status = %status,
        level = %level,
        invariants = applied.len(),
        "Enhanced confidence computed"
    );

    ConfidenceResult {
        confidence_before,
        confidence_after,
        confidence_level: Some(level),
        applied_invariants: applied,
        invariant_violations: enforcement.violations,
        reason_codes,
        explanation: explained.explanation,
        top_reasons: explained.top_reasons,
        truth_status: status,
        applied_policy: policy.applied(),
    }
}

/// Guardrails that ran and passed earn full weight; none ran earns half.
fn guardrails_factor(guardrails: Option<&GuardrailsOutcome>) -> f64 {
    match guardrails {
        None => 0.5,
        Some(g) if g.downgraded => 0.0,
        Some(_) => 1.0,
    }
}

pub fn threshold_level(confidence: Confidence, thresholds: &Thresholds) -> ConfidenceLevel {
    if confidence >= Confidence::from_f64(thresholds.high) {
        ConfidenceLevel::High
    } else if confidence >= Confidence::from_f64(thresholds.medium) {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}
