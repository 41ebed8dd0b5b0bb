//! Legacy 0–100 rule-based scorer.
//!
//! score = base + Σboosts − Σpenalties − 25 (unsupplied channel) − 10 (not PROVEN),
//! clamped to [0, 100], then gated into HIGH / MEDIUM / LOW.

use serde::Serialize;
use smallvec::SmallVec;
use silentwatch_core::constants::MAX_EXPLAIN_ITEMS;
use silentwatch_core::types::{AttemptMeta, Comparisons, ConfidenceLevel, Expectation, FindingType, Sensors};
use tracing::debug;

use super::rules::{rules_for, Rule};
use super::signals::EvidenceSignals;
use crate::expectation::{classify_strength, ExpectationStrength};
use crate::sensors::{SensorPresence, SensorStates};

/// Flat penalty when any sensor channel was not supplied at all.
pub const UNINSTRUMENTED_PENALTY: u32 = 25;
/// Flat penalty when the expectation is not PROVEN.
pub const UNPROVEN_PENALTY: u32 = 10;

pub const HIGH_THRESHOLD: u32 = 80;
pub const MEDIUM_THRESHOLD: u32 = 55;
/// Cap for MEDIUM when the score reached HIGH territory with every channel supplied.
pub const MEDIUM_CAP: u32 = 79;
/// Score held for MEDIUM when no channel produced any data.
pub const NO_DATA_MEDIUM_SCORE: u32 = 76;
/// Cap for a single unrepeated OBSERVED sighting.
pub const OBSERVED_SINGLE_CAP: u32 = 49;

/// A rule (or flat adjustment) that contributed to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    pub id: &'static str,
    pub weight: u32,
    pub reason: &'static str,
}

impl From<&Rule> for RuleHit {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id,
            weight: rule.weight,
            reason: rule.reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreFactors {
    pub expectation_strength: ExpectationStrength,
    pub sensors_present: SensorPresence,
    pub evidence_signals: Vec<&'static str>,
    pub penalties: SmallVec<[RuleHit; 4]>,
    pub boosts: SmallVec<[RuleHit; 4]>,
}

/// Output of the legacy scorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyScore {
    pub score: u8,
    pub level: ConfidenceLevel,
    pub explain: Vec<String>,
    pub factors: ScoreFactors,
    /// Ceiling the OBSERVED correction imposed, if any.
    #[serde(skip)]
    pub observed_ceiling: Option<u8>,
}

/// Inputs the legacy scorer reads.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub finding_type: FindingType,
    pub expectation: Option<&'a Expectation>,
    pub sensors: &'a Sensors,
    pub comparisons: &'a Comparisons,
    pub attempt: &'a AttemptMeta,
}

/// Stateless rule-based scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleScorer;

impl RuleScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, input: &ScoringInput<'_>) -> LegacyScore {
        let strength = classify_strength(input.expectation);
        let states = SensorStates::from_sensors(input.sensors);
        let signals = EvidenceSignals::derive(input.expectation, input.sensors, input.comparisons, input.attempt);

        let Some(rule_set) = rules_for(input.finding_type) else {
            debug!(finding_type = %input.finding_type, "No rule set for finding type, level UNKNOWN");
            return LegacyScore {
                score: 0,
                level: ConfidenceLevel::Unknown,
                explain: vec![format!("No scoring rules for finding type '{}'", input.finding_type)],
                factors: ScoreFactors {
                    expectation_strength: strength,
                    sensors_present: states.presence(),
                    evidence_signals: signals.active(),
                    penalties: SmallVec::new(),
                    boosts: SmallVec::new(),
                },
                observed_ceiling: None,
            };
        };

        let boosts = apply_rules(rule_set.boosts, &signals);
        let mut penalties = apply_rules(rule_set.penalties, &signals);

        if states.any_absent() {
            penalties.push(RuleHit {
                id: "sensors.unsupplied",
                weight: UNINSTRUMENTED_PENALTY,
                reason: "Not every sensor channel was instrumented; the outcome cannot be fully verified",
            });
        }
        if strength != ExpectationStrength::Proven {
            penalties.push(RuleHit {
                id: "expectation.not_proven",
                weight: UNPROVEN_PENALTY,
                reason: "Expectation is not proven by source code",
            });
        }

        let base = match strength.base_score() {
            0 => rule_set.base_score,
            s => s,
        };
        let boost_total: u32 = boosts.iter().map(|h| h.weight).sum();
        let penalty_total: u32 = penalties.iter().map(|h| h.weight).sum();
        let raw = (i64::from(base) + i64::from(boost_total) - i64::from(penalty_total)).clamp(0, 100) as u32;

        let (level, gated) = gate_level(raw, strength, &states);
        let (level, score, observed_ceiling) = apply_observed_correction(level, gated, strength, input.attempt.repeated);

        let explain: Vec<String> = boosts
            .iter()
            .chain(penalties.iter())
            .take(MAX_EXPLAIN_ITEMS)
            .map(|h| h.reason.to_string())
            .collect();

        debug!(
            finding_type = %input.finding_type,
            strength = %strength,
            base,
            boost_total,
            penalty_total,
            raw,
            score,
            level = %level,
            "Legacy score computed"
        );

        LegacyScore {
            score: score as u8,
            level,
            explain,
            factors: ScoreFactors {
                expectation_strength: strength,
                sensors_present: states.presence(),
                evidence_signals: signals.active(),
                penalties,
                boosts,
            },
            observed_ceiling: observed_ceiling.map(|c| c as u8),
        }
    }
}

/// Evaluate every rule in declaration order. No short-circuit, no reordering.
pub fn apply_rules(rules: &[Rule], signals: &EvidenceSignals) -> SmallVec<[RuleHit; 4]> {
    rules
        .iter()
        .filter(|rule| rule.matches(signals))
        .map(RuleHit::from)
        .collect()
}

/// Threshold gating. Order matters.
pub fn gate_level(score: u32, strength: ExpectationStrength, states: &SensorStates) -> (ConfidenceLevel, u32) {
    let presence = states.presence();

    if score >= HIGH_THRESHOLD {
        if strength == ExpectationStrength::Proven && presence.all() {
            return (ConfidenceLevel::High, score);
        }
        let mut capped = score;
        if states.all_supplied() {
            capped = capped.min(MEDIUM_CAP);
        }
        if presence.none() {
            capped = capped.min(NO_DATA_MEDIUM_SCORE);
        }
        return (ConfidenceLevel::Medium, capped);
    }

    if score >= MEDIUM_THRESHOLD {
        (ConfidenceLevel::Medium, score)
    } else {
        (ConfidenceLevel::Low, score)
    }
}

/// A single OBSERVED sighting earns LOW at most; repetition earns MEDIUM at most.
/// Returns the ceiling applied, if any.
pub fn apply_observed_correction(
    level: ConfidenceLevel,
    score: u32,
    strength: ExpectationStrength,
    repeated: bool,
) -> (ConfidenceLevel, u32, Option<u32>) {
    if strength != ExpectationStrength::Observed {
        return (level, score, None);
    }
    if !repeated {
        return (ConfidenceLevel::Low, score.min(OBSERVED_SINGLE_CAP), Some(OBSERVED_SINGLE_CAP));
    }
    if level == ConfidenceLevel::High {
        return (ConfidenceLevel::Medium, score.min(MEDIUM_CAP), Some(MEDIUM_CAP));
    }
    (level, score, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::SensorState;

    fn states(network: SensorState, console: SensorState, ui: SensorState) -> SensorStates {
        SensorStates { network, console, ui }
    }

    #[test]
    fn high_requires_proven_and_all_channels() {
        let all = states(SensorState::Present, SensorState::Present, SensorState::Present);
        assert_eq!(gate_level(85, ExpectationStrength::Proven, &all), (ConfidenceLevel::High, 85));
        assert_eq!(gate_level(85, ExpectationStrength::Weak, &all), (ConfidenceLevel::Medium, 79));

        let one_empty = states(SensorState::Present, SensorState::Empty, SensorState::Present);
        assert_eq!(gate_level(85, ExpectationStrength::Proven, &one_empty), (ConfidenceLevel::Medium, 79));
    }

    #[test]
    fn medium_with_no_data_is_held_at_76() {
        let none = states(SensorState::Empty, SensorState::Empty, SensorState::Empty);
        assert_eq!(gate_level(92, ExpectationStrength::Proven, &none), (ConfidenceLevel::Medium, 76));

        let unsupplied = states(SensorState::Absent, SensorState::Present, SensorState::Present);
        assert_eq!(gate_level(90, ExpectationStrength::Proven, &unsupplied), (ConfidenceLevel::Medium, 90));
    }

    #[test]
    fn lower_bands() {
        let all = states(SensorState::Present, SensorState::Present, SensorState::Present);
        assert_eq!(gate_level(79, ExpectationStrength::Proven, &all).0, ConfidenceLevel::Medium);
        assert_eq!(gate_level(55, ExpectationStrength::Proven, &all).0, ConfidenceLevel::Medium);
        assert_eq!(gate_level(54, ExpectationStrength::Proven, &all).0, ConfidenceLevel::Low);
    }

    #[test]
    fn observed_corrections() {
        assert_eq!(
            apply_observed_correction(ConfidenceLevel::Medium, 70, ExpectationStrength::Observed, false),
            (ConfidenceLevel::Low, 49, Some(49))
        );
        assert_eq!(
            apply_observed_correction(ConfidenceLevel::High, 88, ExpectationStrength::Observed, true),
            (ConfidenceLevel::Medium, 79, Some(79))
        );
        assert_eq!(
            apply_observed_correction(ConfidenceLevel::Medium, 70, ExpectationStrength::Observed, true),
            (ConfidenceLevel::Medium, 70, None)
        );
        assert_eq!(
            apply_observed_correction(ConfidenceLevel::High, 88, ExpectationStrength::Proven, false),
            (ConfidenceLevel::High, 88, None)
        );
    }
}
