//! Confidence policy value types.
//!
//! A loaded policy is immutable: fields are private, only getters are
//! exposed, and it is shared behind `Arc`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use silentwatch_core::Confidence;

use crate::expectation::ExpectationStrength;

pub const BUILTIN_POLICY_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: 0.80,
            medium: 0.55,
            low: 0.30,
        }
    }
}

/// Factor weights for the enhanced blend. Must sum to 1.0 ± 0.01.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyWeights {
    pub promise_strength: f64,
    pub observation_strength: f64,
    pub correlation_quality: f64,
    pub guardrails: f64,
    pub evidence_completeness: f64,
}

impl PolicyWeights {
    pub fn sum(&self) -> f64 {
        self.promise_strength
            + self.observation_strength
            + self.correlation_quality
            + self.guardrails
            + self.evidence_completeness
    }

    pub(crate) fn as_array(&self) -> [(&'static str, f64); 5] {
        [
            ("promiseStrength", self.promise_strength),
            ("observationStrength", self.observation_strength),
            ("correlationQuality", self.correlation_quality),
            ("guardrails", self.guardrails),
            ("evidenceCompleteness", self.evidence_completeness),
        ]
    }
}

impl Default for PolicyWeights {
    fn default() -> Self {
        Self {
            promise_strength: 0.25,
            observation_strength: 0.25,
            correlation_quality: 0.25,
            guardrails: 0.10,
            evidence_completeness: 0.15,
        }
    }
}

/// Non-overridable limits. Whatever a policy file says, these are always
/// replaced with the built-in values after load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruthLocks {
    /// An incomplete evidence package cannot carry CONFIRMED-level confidence.
    pub evidence_complete_required: bool,
    /// Ceiling when the determinism check reports non-deterministic behaviour.
    pub non_deterministic_max_confidence: f64,
    /// Ceiling for a finding guardrails downgraded.
    pub guardrails_max_negative: f64,
}

impl Default for TruthLocks {
    fn default() -> Self {
        Self {
            evidence_complete_required: true,
            non_deterministic_max_confidence: 0.49,
            guardrails_max_negative: 0.69,
        }
    }
}

impl TruthLocks {
    pub const REQUIRED_KEYS: [&'static str; 3] = [
        "evidenceCompleteRequired",
        "nonDeterministicMaxConfidence",
        "guardrailsMaxNegative",
    ];

    pub fn non_deterministic_cap(&self) -> Confidence {
        Confidence::from_f64(self.non_deterministic_max_confidence)
    }

    pub fn guardrails_cap(&self) -> Confidence {
        Confidence::from_f64(self.guardrails_max_negative)
    }

    /// Highest confidence an incomplete evidence package may keep.
    pub fn incomplete_evidence_cap(&self) -> Confidence {
        Confidence::from_basis_points(6_900)
    }
}

/// Where a policy came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PolicySource {
    Builtin,
    File(PathBuf),
}

impl fmt::Display for PolicySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("builtin"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// `{version, source}` reference carried on every enhanced result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedPolicy {
    pub version: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfidencePolicy {
    version: String,
    base_scores: BTreeMap<String, f64>,
    thresholds: Thresholds,
    weights: PolicyWeights,
    truth_locks: TruthLocks,
    source: PolicySource,
}

static BUILTIN: OnceLock<Arc<ConfidencePolicy>> = OnceLock::new();

impl ConfidencePolicy {
    /// The built-in default policy. Always the same instance.
    pub fn builtin() -> Arc<ConfidencePolicy> {
        Arc::clone(BUILTIN.get_or_init(|| {
            Arc::new(ConfidencePolicy {
                version: BUILTIN_POLICY_VERSION.to_string(),
                base_scores: default_base_scores(),
                thresholds: Thresholds::default(),
                weights: PolicyWeights::default(),
                truth_locks: TruthLocks::default(),
                source: PolicySource::Builtin,
            })
        }))
    }

    /// Assemble a validated file policy. Truth locks always come from the defaults.
    pub(crate) fn from_validated(
        version: String,
        base_scores: BTreeMap<String, f64>,
        thresholds: Thresholds,
        weights: PolicyWeights,
        source: PolicySource,
    ) -> Self {
        Self {
            version,
            base_scores,
            thresholds,
            weights,
            truth_locks: TruthLocks::default(),
            source,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn base_scores(&self) -> &BTreeMap<String, f64> {
        &self.base_scores
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn weights(&self) -> &PolicyWeights {
        &self.weights
    }

    pub fn truth_locks(&self) -> &TruthLocks {
        &self.truth_locks
    }

    pub fn source(&self) -> &PolicySource {
        &self.source
    }

    /// Promise-strength factor for an expectation strength. Missing keys
    /// fall back to the built-in table.
    pub fn base_score_for(&self, strength: ExpectationStrength) -> f64 {
        self.base_scores
            .get(strength.as_str())
            .copied()
            .or_else(|| default_base_scores().get(strength.as_str()).copied())
            .unwrap_or(0.0)
    }

    pub fn applied(&self) -> AppliedPolicy {
        AppliedPolicy {
            version: self.version.clone(),
            source: self.source.to_string(),
        }
    }
}

fn default_base_scores() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("PROVEN".to_string(), 0.90),
        ("OBSERVED".to_string(), 0.65),
        ("WEAK".to_string(), 0.40),
        ("UNKNOWN".to_string(), 0.20),
    ])
}
