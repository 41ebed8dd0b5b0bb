//! Expectations: claims about what an interaction should cause.
//! Produced by the extraction collaborator; read-only here.

use serde::{Deserialize, Serialize};

/// Proof level attached by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpectationProof {
    ProvenExpectation,
    ObservedExpectation,
    WeakExpectation,
    UnprovenExpectation,
}

/// What the interaction promises to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectationKind {
    Navigation,
    NetworkAction,
    StateAction,
    Feedback,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Expectation {
    pub promise_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: ExpectationKind,
    /// Navigation path or endpoint the promise names.
    pub target: Option<String>,
    pub proof: Option<ExpectationProof>,
    pub explicit: bool,
    pub source_ref: Option<String>,
    pub evidence_source: Option<String>,
    /// Caller marker. Only `"OBSERVED"` is meaningful.
    pub expectation_strength: Option<String>,
}

impl Expectation {
    pub fn is_unproven(&self) -> bool {
        self.proof == Some(ExpectationProof::UnprovenExpectation)
    }

    /// Whether the expectation points back at source code or recorded evidence.
    pub fn has_source(&self) -> bool {
        self.source_ref.as_deref().is_some_and(|s| !s.is_empty())
            || self.evidence_source.as_deref().is_some_and(|s| !s.is_empty())
    }

    pub fn marked_observed(&self) -> bool {
        self.expectation_strength
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("OBSERVED"))
    }
}
