//! Truth status: the categorical verdict on a finding, and its legal confidence range.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::confidence::Confidence;

/// Verdict on a finding. Declared from least to most certain, so `Ord`
/// compares severity and `min` picks the more conservative status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TruthStatus {
    Ignored,
    Informational,
    Suspected,
    Confirmed,
}

impl TruthStatus {
    pub const ALL: [TruthStatus; 4] = [
        Self::Ignored,
        Self::Informational,
        Self::Suspected,
        Self::Confirmed,
    ];

    /// Closed legal confidence interval for this status.
    ///
    /// - CONFIRMED: [0.70, 1.00]
    /// - SUSPECTED: [0.30, 0.69]
    /// - INFORMATIONAL: [0.01, 0.29]
    /// - IGNORED: exactly 0.00
    pub const fn legal_range(self) -> (Confidence, Confidence) {
        match self {
            Self::Confirmed => (
                Confidence::from_basis_points(7_000),
                Confidence::from_basis_points(10_000),
            ),
            Self::Suspected => (
                Confidence::from_basis_points(3_000),
                Confidence::from_basis_points(6_900),
            ),
            Self::Informational => (
                Confidence::from_basis_points(100),
                Confidence::from_basis_points(2_900),
            ),
            Self::Ignored => (Confidence::ZERO, Confidence::ZERO),
        }
    }

    pub fn min_confidence(self) -> Confidence {
        self.legal_range().0
    }

    pub fn max_confidence(self) -> Confidence {
        self.legal_range().1
    }

    pub fn allows(self, confidence: Confidence) -> bool {
        let (min, max) = self.legal_range();
        confidence >= min && confidence <= max
    }

    /// The most certain status whose floor the confidence reaches.
    /// Values in the gaps between ranges (e.g. 0.695) map to the lower status.
    pub fn for_confidence(confidence: Confidence) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|status| confidence >= status.min_confidence())
            .unwrap_or(Self::Ignored)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Suspected => "SUSPECTED",
            Self::Informational => "INFORMATIONAL",
            Self::Ignored => "IGNORED",
        }
    }
}

impl fmt::Display for TruthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_match_policy_table() {
        assert!(TruthStatus::Confirmed.allows(Confidence::from_f64(0.70)));
        assert!(!TruthStatus::Confirmed.allows(Confidence::from_f64(0.69)));
        assert!(TruthStatus::Suspected.allows(Confidence::from_f64(0.69)));
        assert!(!TruthStatus::Suspected.allows(Confidence::from_f64(0.695)));
        assert!(TruthStatus::Informational.allows(Confidence::from_f64(0.01)));
        assert!(!TruthStatus::Informational.allows(Confidence::ZERO));
        assert!(TruthStatus::Ignored.allows(Confidence::ZERO));
        assert!(!TruthStatus::Ignored.allows(Confidence::from_f64(0.01)));
    }

    #[test]
    fn for_confidence_picks_highest_reached_floor() {
        assert_eq!(TruthStatus::for_confidence(Confidence::ONE), TruthStatus::Confirmed);
        assert_eq!(TruthStatus::for_confidence(Confidence::from_f64(0.695)), TruthStatus::Suspected);
        assert_eq!(TruthStatus::for_confidence(Confidence::from_f64(0.3)), TruthStatus::Suspected);
        assert_eq!(TruthStatus::for_confidence(Confidence::from_f64(0.05)), TruthStatus::Informational);
        assert_eq!(TruthStatus::for_confidence(Confidence::ZERO), TruthStatus::Ignored);
    }

    #[test]
    fn severity_ordering() {
        assert!(TruthStatus::Confirmed > TruthStatus::Suspected);
        assert_eq!(TruthStatus::Confirmed.min(TruthStatus::Informational), TruthStatus::Informational);
        assert_eq!(serde_json::to_string(&TruthStatus::Informational).unwrap(), "\"INFORMATIONAL\"");
    }
}
