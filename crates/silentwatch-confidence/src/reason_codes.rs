//! Canonical reason codes, deduplicated and ordered by priority band.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use silentwatch_core::types::GuardrailsOutcome;

use crate::expectation::ExpectationStrength;
use crate::invariants::InvariantCode;
use crate::sensors::SensorPresence;

/// Priority band, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonBand {
    Critical = 1,
    TruthLock = 2,
    Evidence = 3,
    Guardrails = 4,
    Sensors = 5,
    Expectation = 6,
}

/// Variants are declared in priority order: the derived `Ord` is the
/// output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    UnprovenExpectationContradictedByGuardrails,
    UnprovenExpectation,

    TruthLockInvariantApplied,
    TruthLockNonDeterministicCap,
    TruthLockEvidenceCompletenessRequired,

    EvidenceIncomplete,
    EvidenceCaptureFailed,
    EvidenceSignalsPresent,

    GuardrailsDowngraded,
    GuardrailsConfidenceDelta,

    SensorNetworkPresent,
    SensorNetworkAbsent,
    SensorConsolePresent,
    SensorConsoleAbsent,
    SensorUiPresent,
    SensorUiAbsent,

    ExpectationProven,
    ExpectationObserved,
    ExpectationWeak,
}

impl ReasonCode {
    pub fn band(self) -> ReasonBand {
        use ReasonCode::*;
        match self {
            UnprovenExpectationContradictedByGuardrails | UnprovenExpectation => ReasonBand::Critical,
            TruthLockInvariantApplied | TruthLockNonDeterministicCap | TruthLockEvidenceCompletenessRequired => {
                ReasonBand::TruthLock
            }
            EvidenceIncomplete | EvidenceCaptureFailed | EvidenceSignalsPresent => ReasonBand::Evidence,
            GuardrailsDowngraded | GuardrailsConfidenceDelta => ReasonBand::Guardrails,
            SensorNetworkPresent | SensorNetworkAbsent | SensorConsolePresent | SensorConsoleAbsent
            | SensorUiPresent | SensorUiAbsent => ReasonBand::Sensors,
            ExpectationProven | ExpectationObserved | ExpectationWeak => ReasonBand::Expectation,
        }
    }

    /// Band-major priority number; lower sorts first.
    pub fn priority(self) -> u16 {
        self.band() as u16 * 100 + self as u16
    }

    pub fn as_str(self) -> &'static str {
        use ReasonCode::*;
        match self {
            UnprovenExpectationContradictedByGuardrails => "UNPROVEN_EXPECTATION_CONTRADICTED_BY_GUARDRAILS",
            UnprovenExpectation => "UNPROVEN_EXPECTATION",
            TruthLockInvariantApplied => "TRUTH_LOCK_INVARIANT_APPLIED",
            TruthLockNonDeterministicCap => "TRUTH_LOCK_NON_DETERMINISTIC_CAP",
            TruthLockEvidenceCompletenessRequired => "TRUTH_LOCK_EVIDENCE_COMPLETENESS_REQUIRED",
            EvidenceIncomplete => "EVIDENCE_INCOMPLETE",
            EvidenceCaptureFailed => "EVIDENCE_CAPTURE_FAILED",
            EvidenceSignalsPresent => "EVIDENCE_SIGNALS_PRESENT",
            GuardrailsDowngraded => "GUARDRAILS_DOWNGRADED",
            GuardrailsConfidenceDelta => "GUARDRAILS_CONFIDENCE_DELTA",
            SensorNetworkPresent => "SENSOR_NETWORK_PRESENT",
            SensorNetworkAbsent => "SENSOR_NETWORK_ABSENT",
            SensorConsolePresent => "SENSOR_CONSOLE_PRESENT",
            SensorConsoleAbsent => "SENSOR_CONSOLE_ABSENT",
            SensorUiPresent => "SENSOR_UI_PRESENT",
            SensorUiAbsent => "SENSOR_UI_ABSENT",
            ExpectationProven => "EXPECTATION_PROVEN",
            ExpectationObserved => "EXPECTATION_OBSERVED",
            ExpectationWeak => "EXPECTATION_WEAK",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computed state the generator reads. Nothing here is re-derived.
#[derive(Debug, Clone, Copy)]
pub struct ReasonInputs<'a> {
    pub strength: ExpectationStrength,
    pub expectation_unproven: bool,
    pub presence: SensorPresence,
    /// `None` when no evidence package was supplied.
    pub evidence_complete: Option<bool>,
    pub substantive_evidence: bool,
    pub capture_failures: usize,
    pub guardrails: Option<&'a GuardrailsOutcome>,
    pub applied_invariants: &'a [InvariantCode],
}

pub fn generate(inputs: &ReasonInputs<'_>) -> Vec<ReasonCode> {
    let mut codes = BTreeSet::new();
    let downgraded = inputs.guardrails.is_some_and(|g| g.downgraded);

    if inputs.expectation_unproven {
        codes.insert(if downgraded {
            ReasonCode::UnprovenExpectationContradictedByGuardrails
        } else {
            ReasonCode::UnprovenExpectation
        });
    }

    if !inputs.applied_invariants.is_empty() {
        codes.insert(ReasonCode::TruthLockInvariantApplied);
    }
    for code in inputs.applied_invariants {
        match code {
            InvariantCode::NonDeterministicCap => {
                codes.insert(ReasonCode::TruthLockNonDeterministicCap);
            }
            InvariantCode::EvidenceCompletenessCap | InvariantCode::EvidenceRequiredForConfirmed => {
                codes.insert(ReasonCode::TruthLockEvidenceCompletenessRequired);
            }
            _ => {}
        }
    }

    if inputs.evidence_complete == Some(false) {
        codes.insert(ReasonCode::EvidenceIncomplete);
    }
    if inputs.capture_failures > 0 {
        codes.insert(ReasonCode::EvidenceCaptureFailed);
    }
    if inputs.substantive_evidence {
        codes.insert(ReasonCode::EvidenceSignalsPresent);
    }

    if let Some(g) = inputs.guardrails {
        if g.downgraded {
            codes.insert(ReasonCode::GuardrailsDowngraded);
        }
        if g.has_delta() {
            codes.insert(ReasonCode::GuardrailsConfidenceDelta);
        }
    }

    let p = inputs.presence;
    codes.insert(if p.network { ReasonCode::SensorNetworkPresent } else { ReasonCode::SensorNetworkAbsent });
    codes.insert(if p.console { ReasonCode::SensorConsolePresent } else { ReasonCode::SensorConsoleAbsent });
    codes.insert(if p.ui { ReasonCode::SensorUiPresent } else { ReasonCode::SensorUiAbsent });

    match inputs.strength {
        ExpectationStrength::Proven => {
            codes.insert(ReasonCode::ExpectationProven);
        }
        ExpectationStrength::Observed => {
            codes.insert(ReasonCode::ExpectationObserved);
        }
        ExpectationStrength::Weak => {
            codes.insert(ReasonCode::ExpectationWeak);
        }
        ExpectationStrength::Unknown => {}
    }

    codes.into_iter().collect()
}
