//! # silentwatch-confidence
//!
//! Deterministic confidence scoring and truth-status reconciliation for
//! silent-failure findings.
//!
//! ## Pipeline
//! 1. **Legacy scorer**: sensor normalization, expectation strength, and a
//!    declarative rule table per finding type produce a 0–100 score and level.
//! 2. **Enhanced pipeline** (only when enrichment inputs are present): policy
//!    blend, guardrails, truth locks, truth status, evidence law, one
//!    invariant-enforcer pass, reason codes, explanation.
//! 3. **Boundary adapter**: maps the enhanced 0–1 result back to the legacy
//!    shape.
//!
//! Identical inputs produce identical outputs: no clock, no randomness, and
//! every ordered collection has a fixed order.

pub mod api;
pub mod errors;
pub mod evidence_law;
pub mod expectation;
pub mod explanation;
pub mod invariants;
pub mod policy;
pub mod reason_codes;
pub mod report;
pub mod scoring;
pub mod sensors;

pub use api::{compute_confidence, ConfidenceEngine, ConfidenceInput, ConfidenceOptions, ConfidenceOutput, ConfidenceResult};
pub use errors::{ConfidenceError, EngineResult, PolicyError, ReportError};
pub use explanation::ConfidenceExplanation;
pub use invariants::{InvariantCode, InvariantViolation};
pub use policy::{ConfidencePolicy, PolicyCache};
pub use reason_codes::ReasonCode;
pub use report::ConfidenceReport;
