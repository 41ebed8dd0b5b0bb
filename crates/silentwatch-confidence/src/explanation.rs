//! Truth-aware explanation: why a finding carries its confidence, and what
//! evidence would move it. Built only from state the pipeline already
//! computed.

use serde::Serialize;
use silentwatch_core::constants::MAX_EXPLAIN_ITEMS;
use silentwatch_core::types::GuardrailsOutcome;
use silentwatch_core::{Confidence, TruthStatus};

use crate::expectation::ExpectationStrength;
use crate::sensors::SensorPresence;

/// Suggestions per direction.
pub const MAX_SUGGESTIONS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceExplanation {
    pub why_this_confidence: String,
    pub what_would_increase_confidence: Vec<String>,
    pub what_would_reduce_confidence: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct ExplanationInputs<'a> {
    pub status: TruthStatus,
    pub confidence: Confidence,
    pub strength: ExpectationStrength,
    pub expectation_unproven: bool,
    pub presence: SensorPresence,
    pub evidence_complete: Option<bool>,
    pub substantive_evidence: bool,
    pub guardrails: Option<&'a GuardrailsOutcome>,
    pub capture_failures: usize,
    pub invariant_count: usize,
    pub non_deterministic: bool,
    pub non_deterministic_cap: Confidence,
    pub evidence_law_note: Option<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Explained {
    pub explanation: ConfidenceExplanation,
    /// Why-sentences followed by suggestions, at most eight.
    pub top_reasons: Vec<String>,
}

pub fn explain(inputs: &ExplanationInputs<'_>) -> Explained {
    let why = why_sentences(inputs);
    let increase = increase_suggestions(inputs);
    let reduce = reduce_suggestions(inputs);

    let top_reasons = why
        .iter()
        .chain(increase.iter())
        .chain(reduce.iter())
        .take(MAX_EXPLAIN_ITEMS)
        .cloned()
        .collect();

    Explained {
        explanation: ConfidenceExplanation {
            why_this_confidence: why.join(" "),
            what_would_increase_confidence: increase,
            what_would_reduce_confidence: reduce,
        },
        top_reasons,
    }
}

fn why_sentences(inputs: &ExplanationInputs<'_>) -> Vec<String> {
    let score = inputs.confidence.to_score();
    let mut out = Vec::with_capacity(8);

    out.push(match inputs.status {
        TruthStatus::Confirmed => format!("Confirmed silent failure at {score}% confidence."),
        TruthStatus::Suspected => {
            format!("Suspected silent failure at {score}% confidence; the evidence is suggestive but not conclusive.")
        }
        TruthStatus::Informational => {
            format!("Informational signal at {score}% confidence; not treated as a failure.")
        }
        TruthStatus::Ignored => format!("Ignored at {score}% confidence."),
    });

    if inputs.expectation_unproven {
        out.push("The expectation is explicitly marked unproven.".to_string());
    } else {
        match inputs.strength {
            ExpectationStrength::Proven => out.push("The expectation is proven by source code.".to_string()),
            ExpectationStrength::Observed => {
                out.push("The expectation was inferred from observed behaviour.".to_string())
            }
            ExpectationStrength::Weak => out.push("The expectation has no supporting proof.".to_string()),
            ExpectationStrength::Unknown => {}
        }
    }

    let present = inputs.presence.present_channels();
    if present.is_empty() {
        out.push("No sensor channel captured any data.".to_string());
    } else {
        out.push(format!("Sensor data was captured from {}.", present.join(", ")));
    }

    match inputs.evidence_complete {
        Some(true) => out.push("The evidence package is complete.".to_string()),
        Some(false) => out.push("The evidence package is incomplete.".to_string()),
        None => {}
    }

    if let Some(g) = inputs.guardrails {
        if g.downgraded {
            match g.decision() {
                Some(decision) => out.push(format!("Guardrails downgraded this finding to {decision}.")),
                None => out.push("Guardrails downgraded this finding.".to_string()),
            }
        } else if g.has_delta() {
            out.push(format!("Guardrails adjusted confidence by {:+.2}.", g.confidence_delta));
        }
    }

    match inputs.capture_failures {
        0 => {}
        1 => out.push("1 evidence capture failed.".to_string()),
        n => out.push(format!("{n} evidence captures failed.")),
    }

    match inputs.invariant_count {
        0 => {}
        1 => out.push("1 invariant correction was applied.".to_string()),
        n => out.push(format!("{n} invariant corrections were applied.")),
    }

    if let Some(note) = inputs.evidence_law_note {
        out.push(note.to_string());
    }

    out
}

fn increase_suggestions(inputs: &ExplanationInputs<'_>) -> Vec<String> {
    let mut out = Vec::with_capacity(MAX_SUGGESTIONS);

    if inputs.strength != ExpectationStrength::Proven {
        out.push("Link the expectation to a source reference that proves it.".to_string());
    }
    let missing = inputs.presence.missing_channels();
    if !missing.is_empty() {
        out.push(format!("Capture {} sensor data.", missing.join(", ")));
    }
    if inputs.evidence_complete == Some(false) {
        out.push("Capture a complete before/after evidence package.".to_string());
    }
    if inputs.capture_failures > 0 {
        out.push("Resolve the failed evidence captures and re-run.".to_string());
    }
    if inputs.non_deterministic {
        out.push("Make the interaction reproduce deterministically.".to_string());
    }

    out.truncate(MAX_SUGGESTIONS);
    out
}

fn reduce_suggestions(inputs: &ExplanationInputs<'_>) -> Vec<String> {
    let mut out = Vec::with_capacity(MAX_SUGGESTIONS);

    if inputs.status >= TruthStatus::Suspected && !inputs.presence.ui {
        out.push("Visible UI feedback after the interaction would reduce confidence.".to_string());
    }
    if inputs.status >= TruthStatus::Suspected && inputs.substantive_evidence {
        out.push("Evidence that the promised effect occurred would reduce confidence.".to_string());
    }
    if inputs.status == TruthStatus::Confirmed && !inputs.non_deterministic {
        out.push(format!(
            "A non-deterministic replay would cap confidence at {}.",
            inputs.non_deterministic_cap
        ));
    }
    if inputs.guardrails.is_none() {
        out.push("A guardrails downgrade would reduce confidence.".to_string());
    }

    out.truncate(MAX_SUGGESTIONS);
    out
}
