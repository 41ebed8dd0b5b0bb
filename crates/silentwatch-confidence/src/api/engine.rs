//! ConfidenceEngine: the single `compute_confidence` entry point.
//!
//! The process-wide engine lives in a `OnceLock`, lock-free after first use.
//! Tests and embedders that need isolation build their own engine with its
//! own `PolicyCache`.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use silentwatch_core::config::ConfidenceConfig;
use tracing::{debug, info};

use super::enhanced;
use super::input::ConfidenceInput;
use super::output::ConfidenceOutput;
use crate::errors::{ConfidenceError, EngineResult};
use crate::policy::{ConfidencePolicy, PolicyCache};
use crate::scoring::RuleScorer;

static ENGINE: OnceLock<Arc<ConfidenceEngine>> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct ConfidenceEngine {
    policies: Arc<PolicyCache>,
    config: ConfidenceConfig,
    scorer: RuleScorer,
}

impl ConfidenceEngine {
    pub fn new(policies: Arc<PolicyCache>, config: ConfidenceConfig) -> Self {
        Self {
            policies,
            config,
            scorer: RuleScorer::new(),
        }
    }

    pub fn with_config(config: ConfidenceConfig) -> Self {
        Self::new(Arc::new(PolicyCache::new()), config)
    }

    pub fn policies(&self) -> &Arc<PolicyCache> {
        &self.policies
    }

    pub fn config(&self) -> &ConfidenceConfig {
        &self.config
    }

    /// Score one finding. Always runs the legacy scorer; runs the enhanced
    /// pipeline only when an enrichment input is present.
    pub fn compute_confidence(&self, input: &ConfidenceInput) -> EngineResult<ConfidenceOutput> {
        if let Some(g) = &input.guardrails_outcome {
            if !g.confidence_delta.is_finite() {
                return Err(ConfidenceError::InvalidInput(format!(
                    "guardrails confidenceDelta must be finite, got {}",
                    g.confidence_delta
                )));
            }
        }
        let legacy = self.scorer.score(&input.scoring_input());

        if !input.needs_enrichment() {
            debug!(finding_type = %input.finding_type, score = legacy.score, "Legacy confidence path");
            return Ok(ConfidenceOutput::from_legacy(legacy));
        }

        let policy = self.policy_for(input)?;
        let result = enhanced::run(input, &legacy, &policy);
        Ok(ConfidenceOutput::from_enhanced(
            legacy,
            result,
            self.config.effective_max_explain_items(),
        ))
    }

    /// Per-call options win over the engine config.
    fn policy_for(&self, input: &ConfidenceInput) -> EngineResult<Arc<ConfidencePolicy>> {
        let policy_path = input
            .options
            .policy_path
            .as_deref()
            .or(self.config.policy_path.as_deref().map(Path::new));
        let project_dir = input
            .options
            .project_dir
            .as_deref()
            .or(self.config.project_dir.as_deref().map(Path::new));
        Ok(self.policies.load(policy_path, project_dir)?)
    }
}

impl Default for ConfidenceEngine {
    fn default() -> Self {
        Self::with_config(ConfidenceConfig::default())
    }
}

/// Install the process-wide engine. Returns false if one already exists.
pub fn initialize(config: ConfidenceConfig) -> bool {
    let installed = ENGINE.set(Arc::new(ConfidenceEngine::with_config(config))).is_ok();
    if installed {
        info!("Confidence engine initialized");
    }
    installed
}

/// The process-wide engine, created with defaults on first use.
pub fn engine() -> Arc<ConfidenceEngine> {
    Arc::clone(ENGINE.get_or_init(|| Arc::new(ConfidenceEngine::default())))
}

/// Score one finding with the process-wide engine.
pub fn compute_confidence(input: &ConfidenceInput) -> EngineResult<ConfidenceOutput> {
    ENGINE
        .get_or_init(|| Arc::new(ConfidenceEngine::default()))
        .compute_confidence(input)
}
