//! Canonical confidence API.

pub mod engine;
pub mod enhanced;
pub mod input;
pub mod output;

pub use engine::{compute_confidence, engine, initialize, ConfidenceEngine};
pub use input::{ConfidenceInput, ConfidenceOptions};
pub use output::{level_for_score, ConfidenceOutput, ConfidenceResult};
