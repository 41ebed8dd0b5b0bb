//! Rule-based scoring: signals → declarative rule table → legacy 0–100 score.

pub mod engine;
pub mod rules;
pub mod signals;

pub use engine::{gate_level, LegacyScore, RuleHit, RuleScorer, ScoreFactors, ScoringInput};
pub use rules::{rules_for, Rule, RuleSet, RULE_TABLE};
pub use signals::{EvidenceSignals, Signal};
