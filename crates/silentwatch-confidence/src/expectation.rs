//! Expectation strength classification.

use std::fmt;

use serde::{Deserialize, Serialize};
use silentwatch_core::types::{Expectation, ExpectationProof};

/// How well an expectation is backed by proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpectationStrength {
    Proven,
    Observed,
    Weak,
    Unknown,
}

impl ExpectationStrength {
    /// Legacy base score. Zero is a sentinel: use the finding type's base score.
    pub fn base_score(self) -> u32 {
        match self {
            Self::Proven => 70,
            Self::Observed => 55,
            Self::Weak => 50,
            Self::Unknown => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Proven => "PROVEN",
            Self::Observed => "OBSERVED",
            Self::Weak => "WEAK",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ExpectationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an expectation. Checks run in order: proven, observed, weak.
pub fn classify_strength(expectation: Option<&Expectation>) -> ExpectationStrength {
    let Some(exp) = expectation else {
        return ExpectationStrength::Unknown;
    };

    if exp.proof == Some(ExpectationProof::ProvenExpectation) || exp.explicit || exp.has_source() {
        ExpectationStrength::Proven
    } else if exp.marked_observed() || exp.proof == Some(ExpectationProof::ObservedExpectation) {
        ExpectationStrength::Observed
    } else {
        ExpectationStrength::Weak
    }
}
