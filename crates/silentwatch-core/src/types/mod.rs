//! Shared data structures (no scoring logic).

pub mod confidence;
pub mod evidence;
pub mod execution;
pub mod expectation;
pub mod finding;
pub mod guardrails;
pub mod sensors;
pub mod truth_status;

pub use confidence::Confidence;
pub use evidence::{CaptureFailure, Comparisons, EvidenceIntent, EvidencePackage};
pub use execution::{ExecutionRecord, Judgment, JudgmentOutcome};
pub use expectation::{Expectation, ExpectationKind, ExpectationProof};
pub use finding::{AttemptMeta, ConfidenceLevel, DeterminismVerdict, FindingType, VerificationStatus};
pub use guardrails::GuardrailsOutcome;
pub use sensors::{ConsoleMessage, ConsoleSensor, NetworkSensor, Sensors, UiSignalSensor};
pub use truth_status::TruthStatus;
