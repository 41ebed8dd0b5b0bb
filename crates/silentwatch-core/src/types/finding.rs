//! Finding-level classifications shared by the scorer and report writers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of silent failure a detector reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingType {
    NetworkSilentFailure,
    ValidationSilentFailure,
    MissingFeedbackFailure,
    NoEffectSilentFailure,
    MissingNetworkAction,
    MissingStateAction,
    NavigationSilentFailure,
    PartialNavigationFailure,
    FlowSilentFailure,
    ObservedBreak,
    /// A tag this build does not recognise. Scored without rules.
    #[default]
    #[serde(other)]
    Unknown,
}

impl FindingType {
    /// The ten finding types that carry a scoring rule set.
    pub const SCORED: [FindingType; 10] = [
        Self::NetworkSilentFailure,
        Self::ValidationSilentFailure,
        Self::MissingFeedbackFailure,
        Self::NoEffectSilentFailure,
        Self::MissingNetworkAction,
        Self::MissingStateAction,
        Self::NavigationSilentFailure,
        Self::PartialNavigationFailure,
        Self::FlowSilentFailure,
        Self::ObservedBreak,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NetworkSilentFailure => "network_silent_failure",
            Self::ValidationSilentFailure => "validation_silent_failure",
            Self::MissingFeedbackFailure => "missing_feedback_failure",
            Self::NoEffectSilentFailure => "no_effect_silent_failure",
            Self::MissingNetworkAction => "missing_network_action",
            Self::MissingStateAction => "missing_state_action",
            Self::NavigationSilentFailure => "navigation_silent_failure",
            Self::PartialNavigationFailure => "partial_navigation_failure",
            Self::FlowSilentFailure => "flow_silent_failure",
            Self::ObservedBreak => "observed_break",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse confidence level. Declared low to high so `min` is conservative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    Unknown,
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttemptMeta {
    /// The interaction was replayed and the failure reproduced.
    pub repeated: bool,
    pub attempts: u32,
}

/// Result of the determinism check run on repeated observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeterminismVerdict {
    Deterministic,
    NonDeterministic,
    #[serde(other)]
    Unknown,
}

/// Outcome of the verification stage for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Verified,
    VerifiedWithErrors,
    Failed,
    #[serde(other)]
    Unknown,
}
