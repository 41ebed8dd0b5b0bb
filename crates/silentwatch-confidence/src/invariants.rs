//! Invariant enforcement: legal confidence ranges per truth status, plus caps.
//!
//! Rules run once, in a fixed order, each against the running corrected
//! value left by the previous rule. Never re-run the enforcer on its own
//! output.

use std::fmt;

use serde::Serialize;
use silentwatch_core::types::VerificationStatus;
use silentwatch_core::{Confidence, TruthStatus};
use tracing::debug;

/// Cap when the expectation proof is `UNPROVEN_EXPECTATION`.
pub const UNPROVEN_CAP: Confidence = Confidence::from_basis_points(3_900);
/// Cap when verification finished with errors.
pub const VERIFIED_WITH_ERRORS_CAP: Confidence = Confidence::from_basis_points(4_900);

/// Every invariant that can correct a finding, across truth locks, the
/// evidence law, and the enforcer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvariantCode {
    NonDeterministicCap,
    EvidenceCompletenessCap,
    GuardrailsNegativeCap,
    ObservedExpectationCap,
    EvidenceRequiredForConfirmed,
    ConfirmedRange,
    SuspectedRange,
    InformationalRange,
    IgnoredRange,
    UnprovenExpectationCap,
    VerifiedWithErrorsCap,
    GuardrailsDecisionRange,
    StatusReconciled,
}

impl InvariantCode {
    pub fn range_for(status: TruthStatus) -> Self {
        match status {
            TruthStatus::Confirmed => Self::ConfirmedRange,
            TruthStatus::Suspected => Self::SuspectedRange,
            TruthStatus::Informational => Self::InformationalRange,
            TruthStatus::Ignored => Self::IgnoredRange,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NonDeterministicCap => "NON_DETERMINISTIC_CAP",
            Self::EvidenceCompletenessCap => "EVIDENCE_COMPLETENESS_CAP",
            Self::GuardrailsNegativeCap => "GUARDRAILS_NEGATIVE_CAP",
            Self::ObservedExpectationCap => "OBSERVED_EXPECTATION_CAP",
            Self::EvidenceRequiredForConfirmed => "EVIDENCE_REQUIRED_FOR_CONFIRMED",
            Self::ConfirmedRange => "CONFIRMED_RANGE",
            Self::SuspectedRange => "SUSPECTED_RANGE",
            Self::InformationalRange => "INFORMATIONAL_RANGE",
            Self::IgnoredRange => "IGNORED_RANGE",
            Self::UnprovenExpectationCap => "UNPROVEN_EXPECTATION_CAP",
            Self::VerifiedWithErrorsCap => "VERIFIED_WITH_ERRORS_CAP",
            Self::GuardrailsDecisionRange => "GUARDRAILS_DECISION_RANGE",
            Self::StatusReconciled => "STATUS_RECONCILED",
        }
    }
}

impl fmt::Display for InvariantCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvariantViolation {
    pub code: InvariantCode,
    pub message: String,
    pub corrected: Confidence,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnforcementContext {
    pub expectation_unproven: bool,
    pub verification_status: Option<VerificationStatus>,
    /// Decision of a guardrails outcome that marked the finding downgraded.
    pub guardrails_decision: Option<TruthStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enforcement {
    pub violated: bool,
    pub violations: Vec<InvariantViolation>,
    pub corrected_confidence: Confidence,
    pub corrected_status: TruthStatus,
}

/// Check a (confidence, status) pair against the invariant table.
pub fn enforce(confidence: Confidence, status: TruthStatus, ctx: &EnforcementContext) -> Enforcement {
    let mut current = confidence;
    let mut status = status;
    let mut violations = Vec::new();

    // 1. Legal range for the status.
    let (min, max) = status.legal_range();
    if current < min || current > max {
        let corrected = current.clamp(min, max);
        violations.push(InvariantViolation {
            code: InvariantCode::range_for(status),
            message: format!("{status} requires confidence in [{min}, {max}], got {current}"),
            corrected,
        });
        current = corrected;
    }

    // 2. Unproven expectation cap.
    if ctx.expectation_unproven && current > UNPROVEN_CAP {
        violations.push(InvariantViolation {
            code: InvariantCode::UnprovenExpectationCap,
            message: format!("Unproven expectation caps confidence at {UNPROVEN_CAP}, got {current}"),
            corrected: UNPROVEN_CAP,
        });
        current = UNPROVEN_CAP;
    }

    // 3. Verification finished with errors.
    if ctx.verification_status == Some(VerificationStatus::VerifiedWithErrors) && current > VERIFIED_WITH_ERRORS_CAP {
        violations.push(InvariantViolation {
            code: InvariantCode::VerifiedWithErrorsCap,
            message: format!("Verification with errors caps confidence at {VERIFIED_WITH_ERRORS_CAP}, got {current}"),
            corrected: VERIFIED_WITH_ERRORS_CAP,
        });
        current = VERIFIED_WITH_ERRORS_CAP;
    }

    // 4. Guardrails decision range. Only a lower decision is adopted, and the
    // value is only ever pulled down into it.
    if let Some(decision) = ctx.guardrails_decision.filter(|d| *d < status) {
        let (_, max) = decision.legal_range();
        let corrected = current.min(max);
        violations.push(InvariantViolation {
            code: InvariantCode::GuardrailsDecisionRange,
            message: format!("Guardrails decided {decision} over {status}; confidence {current} → {corrected}"),
            corrected,
        });
        current = corrected;
        status = decision;
    }

    // The caps above may leave the value below the status floor; the status
    // follows the confidence down, never the other way round.
    if !status.allows(current) {
        let lowered = status.min(TruthStatus::for_confidence(current));
        let (min, max) = lowered.legal_range();
        let corrected = current.clamp(min, max);
        violations.push(InvariantViolation {
            code: InvariantCode::StatusReconciled,
            message: format!("Confidence {current} is outside {status}; status lowered to {lowered}"),
            corrected,
        });
        current = corrected;
        status = lowered;
    }

    for v in &violations {
        debug!(code = %v.code, corrected = %v.corrected, message = %v.message, "Invariant corrected");
    }

    Enforcement {
        violated: !violations.is_empty(),
        violations,
        corrected_confidence: current,
        corrected_status: status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(v: f64) -> Confidence {
        Confidence::from_f64(v)
    }

    #[test]
    fn in_range_pair_is_untouched() {
        let out = enforce(c(0.85), TruthStatus::Confirmed, &EnforcementContext::default());
        assert!(!out.violated);
        assert_eq!(out.corrected_confidence, c(0.85));
        assert_eq!(out.corrected_status, TruthStatus::Confirmed);
    }

    #[test]
    fn range_correction_clamps_to_nearest_bound() {
        let out = enforce(c(0.95), TruthStatus::Suspected, &EnforcementContext::default());
        assert_eq!(out.corrected_confidence, c(0.69));
        assert_eq!(out.violations[0].code, InvariantCode::SuspectedRange);

        let out = enforce(c(0.4), TruthStatus::Ignored, &EnforcementContext::default());
        assert_eq!(out.corrected_confidence, Confidence::ZERO);
        assert_eq!(out.violations[0].code, InvariantCode::IgnoredRange);
    }

    #[test]
    fn later_rules_see_earlier_corrections() {
        let ctx = EnforcementContext {
            expectation_unproven: true,
            verification_status: Some(VerificationStatus::VerifiedWithErrors),
            ..Default::default()
        };
        // Range lifts 0.5 to 0.70, the unproven cap pulls it to 0.39, the
        // 0.49 cap then has nothing to do.
        let out = enforce(c(0.5), TruthStatus::Confirmed, &ctx);
        let codes: Vec<_> = out.violations.iter().map(|v| v.code).collect();
        assert_eq!(
            codes,
            vec![InvariantCode::ConfirmedRange, InvariantCode::UnprovenExpectationCap, InvariantCode::StatusReconciled]
        );
        assert_eq!(out.corrected_confidence, c(0.39));
        assert_eq!(out.corrected_status, TruthStatus::Suspected);
    }

    #[test]
    fn guardrails_decision_forces_range_and_status() {
        let ctx = EnforcementContext {
            guardrails_decision: Some(TruthStatus::Informational),
            ..Default::default()
        };
        let out = enforce(c(0.8), TruthStatus::Confirmed, &ctx);
        assert_eq!(out.corrected_confidence, c(0.29));
        assert_eq!(out.corrected_status, TruthStatus::Informational);

        let ignore = EnforcementContext {
            guardrails_decision: Some(TruthStatus::Ignored),
            ..Default::default()
        };
        let out = enforce(c(0.5), TruthStatus::Suspected, &ignore);
        assert_eq!(out.corrected_confidence, Confidence::ZERO);
        assert_eq!(out.corrected_status, TruthStatus::Ignored);
    }

    #[test]
    fn higher_guardrails_decision_never_lifts_a_capped_value() {
        let ctx = EnforcementContext {
            expectation_unproven: true,
            verification_status: Some(VerificationStatus::VerifiedWithErrors),
            guardrails_decision: Some(TruthStatus::Confirmed),
        };
        let out = enforce(c(0.6), TruthStatus::Suspected, &ctx);
        assert_eq!(out.corrected_confidence, c(0.39));
        assert_eq!(out.corrected_status, TruthStatus::Suspected);
        assert!(out.violations.iter().all(|v| v.code != InvariantCode::GuardrailsDecisionRange));
    }

    #[test]
    fn lower_decision_below_its_floor_keeps_the_capped_value() {
        let ctx = EnforcementContext {
            expectation_unproven: true,
            guardrails_decision: Some(TruthStatus::Suspected),
            ..Default::default()
        };
        let out = enforce(c(0.2), TruthStatus::Confirmed, &ctx);
        assert_eq!(out.corrected_confidence, c(0.39));
        assert_eq!(out.corrected_status, TruthStatus::Suspected);
    }

    #[test]
    fn same_decision_as_status_is_not_a_violation() {
        let ctx = EnforcementContext {
            guardrails_decision: Some(TruthStatus::Suspected),
            ..Default::default()
        };
        let out = enforce(c(0.5), TruthStatus::Suspected, &ctx);
        assert!(!out.violated);
    }

    #[test]
    fn verified_with_errors_cap() {
        let ctx = EnforcementContext {
            verification_status: Some(VerificationStatus::VerifiedWithErrors),
            ..Default::default()
        };
        let out = enforce(c(0.6), TruthStatus::Suspected, &ctx);
        assert_eq!(out.corrected_confidence, c(0.49));
        assert_eq!(out.corrected_status, TruthStatus::Suspected);
    }
}
