//! Declarative per-finding-type scoring rules.
//!
//! Each finding type maps to a base score plus ordered boost and penalty
//! rules. A rule fires when every condition in its predicate holds. Adding a
//! finding type means adding a `RuleSet` to `RULE_TABLE`; the applier in
//! `engine.rs` never changes.

use silentwatch_core::types::FindingType;

use super::signals::{EvidenceSignals, Signal};

/// One conjunct of a rule predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cond {
    pub signal: Signal,
    pub expected: bool,
}

const fn is(signal: Signal) -> Cond {
    Cond { signal, expected: true }
}

const fn not(signal: Signal) -> Cond {
    Cond { signal, expected: false }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub id: &'static str,
    pub when: &'static [Cond],
    pub weight: u32,
    pub reason: &'static str,
}

impl Rule {
    pub fn matches(&self, signals: &EvidenceSignals) -> bool {
        self.when.iter().all(|c| signals.get(c.signal) == c.expected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    pub finding_type: FindingType,
    /// Used when the expectation strength is UNKNOWN.
    pub base_score: u32,
    pub boosts: &'static [Rule],
    pub penalties: &'static [Rule],
}

use Signal::*;

pub static RULE_TABLE: [RuleSet; 10] = [
    RuleSet {
        finding_type: FindingType::NetworkSilentFailure,
        base_score: 60,
        boosts: &[
            Rule {
                id: "network.failed_without_feedback",
                when: &[is(NetworkFailed), not(UiFeedback)],
                weight: 20,
                reason: "Network request failed and no UI feedback was shown",
            },
            Rule {
                id: "network.console_errors",
                when: &[is(NetworkFailed), is(ConsoleErrors)],
                weight: 5,
                reason: "Console errors accompany the failed request",
            },
            Rule {
                id: "network.repeated",
                when: &[is(Repeated)],
                weight: 5,
                reason: "Failure reproduced on a repeated attempt",
            },
        ],
        penalties: &[
            Rule {
                id: "network.feedback_shown",
                when: &[is(UiFeedback)],
                weight: 25,
                reason: "UI feedback was shown after the request",
            },
            Rule {
                id: "network.no_failure_captured",
                when: &[not(NetworkFailed)],
                weight: 15,
                reason: "No failed network request was captured",
            },
        ],
    },
    RuleSet {
        finding_type: FindingType::ValidationSilentFailure,
        base_score: 55,
        boosts: &[
            Rule {
                id: "validation.no_feedback",
                when: &[not(ValidationFeedback), not(UiFeedback)],
                weight: 15,
                reason: "Submission produced no validation feedback",
            },
            Rule {
                id: "validation.blocked_before_request",
                when: &[is(NetworkSilent)],
                weight: 5,
                reason: "Submission was blocked before any request was sent",
            },
            Rule {
                id: "validation.console_errors",
                when: &[is(ConsoleErrors)],
                weight: 5,
                reason: "Console errors recorded during submission",
            },
            Rule {
                id: "validation.repeated",
                when: &[is(Repeated)],
                weight: 5,
                reason: "Failure reproduced on a repeated attempt",
            },
        ],
        penalties: &[
            Rule {
                id: "validation.feedback_shown",
                when: &[is(ValidationFeedback)],
                weight: 30,
                reason: "Validation feedback was displayed",
            },
            Rule {
                id: "validation.url_changed",
                when: &[is(UrlChanged)],
                weight: 15,
                reason: "URL changed after submission",
            },
        ],
    },
    RuleSet {
        finding_type: FindingType::MissingFeedbackFailure,
        base_score: 55,
        boosts: &[
            Rule {
                id: "feedback.activity_without_feedback",
                when: &[is(NetworkActivity), not(UiFeedback)],
                weight: 15,
                reason: "Network activity completed with no UI feedback",
            },
            Rule {
                id: "feedback.slow_without_indicator",
                when: &[is(NetworkSlow), not(UiFeedback)],
                weight: 10,
                reason: "Slow request ran with no loading indicator",
            },
            Rule {
                id: "feedback.repeated",
                when: &[is(Repeated)],
                weight: 5,
                reason: "Failure reproduced on a repeated attempt",
            },
        ],
        penalties: &[
            Rule {
                id: "feedback.feedback_detected",
                when: &[is(UiFeedback)],
                weight: 30,
                reason: "UI feedback was detected",
            },
            Rule {
                id: "feedback.no_activity",
                when: &[not(NetworkActivity)],
                weight: 10,
                reason: "No network activity to give feedback about",
            },
        ],
    },
    RuleSet {
        finding_type: FindingType::NoEffectSilentFailure,
        base_score: 50,
        boosts: &[
            Rule {
                id: "no_effect.nothing_changed",
                when: &[not(UrlChanged), not(DomChanged), not(StateChanged)],
                weight: 20,
                reason: "Interaction changed neither URL, DOM, nor state",
            },
            Rule {
                id: "no_effect.no_visual_change",
                when: &[not(ScreenshotChanged)],
                weight: 5,
                reason: "No visual change between before and after screenshots",
            },
            Rule {
                id: "no_effect.network_silent",
                when: &[is(NetworkSilent)],
                weight: 5,
                reason: "No network activity followed the interaction",
            },
            Rule {
                id: "no_effect.repeated",
                when: &[is(Repeated)],
                weight: 5,
                reason: "Failure reproduced on a repeated attempt",
            },
        ],
        penalties: &[
            Rule {
                id: "no_effect.dom_changed",
                when: &[is(DomChanged)],
                weight: 20,
                reason: "DOM changed after the interaction",
            },
            Rule {
                id: "no_effect.url_changed",
                when: &[is(UrlChanged)],
                weight: 20,
                reason: "URL changed after the interaction",
            },
            Rule {
                id: "no_effect.state_changed",
                when: &[is(StateChanged)],
                weight: 15,
                reason: "Application state changed after the interaction",
            },
        ],
    },
    RuleSet {
        finding_type: FindingType::MissingNetworkAction,
        base_score: 55,
        boosts: &[
            Rule {
                id: "missing_network.silent_despite_promise",
                when: &[is(PromisesNetwork), is(NetworkSilent)],
                weight: 20,
                reason: "Zero network activity despite a code promise",
            },
            Rule {
                id: "missing_network.no_feedback",
                when: &[not(UiFeedback)],
                weight: 5,
                reason: "No UI feedback explains the missing request",
            },
            Rule {
                id: "missing_network.repeated",
                when: &[is(Repeated)],
                weight: 5,
                reason: "Failure reproduced on a repeated attempt",
            },
        ],
        penalties: &[
            Rule {
                id: "missing_network.activity_observed",
                when: &[is(NetworkActivity)],
                weight: 25,
                reason: "Network activity was observed",
            },
            Rule {
                id: "missing_network.no_promise",
                when: &[not(PromisesNetwork)],
                weight: 10,
                reason: "No network call is promised in code",
            },
        ],
    },
    RuleSet {
        finding_type: FindingType::MissingStateAction,
        base_score: 50,
        boosts: &[
            Rule {
                id: "missing_state.no_mutation",
                when: &[is(PromisesState), not(StateChanged)],
                weight: 20,
                reason: "Promised state mutation did not happen",
            },
            Rule {
                id: "missing_state.dom_unchanged",
                when: &[not(DomChanged)],
                weight: 5,
                reason: "DOM did not change after the interaction",
            },
            Rule {
                id: "missing_state.repeated",
                when: &[is(Repeated)],
                weight: 5,
                reason: "Failure reproduced on a repeated attempt",
            },
        ],
        penalties: &[
            Rule {
                id: "missing_state.state_changed",
                when: &[is(StateChanged)],
                weight: 30,
                reason: "State changed after the interaction",
            },
            Rule {
                id: "missing_state.dom_changed",
                when: &[is(DomChanged)],
                weight: 10,
                reason: "DOM changed, state may have been updated indirectly",
            },
        ],
    },
    RuleSet {
        finding_type: FindingType::NavigationSilentFailure,
        base_score: 60,
        boosts: &[
            Rule {
                id: "navigation.url_unchanged",
                when: &[is(PromisesNavigation), not(UrlChanged)],
                weight: 20,
                reason: "Promised navigation did not change the URL",
            },
            Rule {
                id: "navigation.no_feedback",
                when: &[not(UrlChanged), not(UiFeedback)],
                weight: 10,
                reason: "No URL change and no UI feedback",
            },
            Rule {
                id: "navigation.console_errors",
                when: &[is(ConsoleErrors)],
                weight: 5,
                reason: "Console errors recorded during navigation",
            },
            Rule {
                id: "navigation.repeated",
                when: &[is(Repeated)],
                weight: 5,
                reason: "Failure reproduced on a repeated attempt",
            },
        ],
        penalties: &[
            Rule {
                id: "navigation.target_reached",
                when: &[is(UrlChanged), is(TargetReached)],
                weight: 40,
                reason: "Navigation reached the promised target",
            },
            Rule {
                id: "navigation.feedback_shown",
                when: &[is(UiFeedback)],
                weight: 15,
                reason: "UI feedback was shown instead of navigating",
            },
        ],
    },
    RuleSet {
        finding_type: FindingType::PartialNavigationFailure,
        base_score: 55,
        boosts: &[
            Rule {
                id: "partial_navigation.target_missed",
                when: &[is(UrlChanged), is(TargetMissed)],
                weight: 20,
                reason: "URL changed but the promised target was not reached",
            },
            Rule {
                id: "partial_navigation.no_feedback",
                when: &[is(UrlChanged), not(UiFeedback)],
                weight: 10,
                reason: "URL changed but no UI feedback",
            },
            Rule {
                id: "partial_navigation.repeated",
                when: &[is(Repeated)],
                weight: 5,
                reason: "Failure reproduced on a repeated attempt",
            },
        ],
        penalties: &[
            Rule {
                id: "partial_navigation.target_reached",
                when: &[is(TargetReached)],
                weight: 35,
                reason: "Promised target was reached",
            },
            Rule {
                id: "partial_navigation.url_unchanged",
                when: &[not(UrlChanged)],
                weight: 10,
                reason: "URL did not change at all",
            },
        ],
    },
    RuleSet {
        finding_type: FindingType::FlowSilentFailure,
        base_score: 50,
        boosts: &[
            Rule {
                id: "flow.failed_without_feedback",
                when: &[is(NetworkFailed), not(UiFeedback)],
                weight: 15,
                reason: "Flow request failed and no UI feedback was shown",
            },
            Rule {
                id: "flow.no_progress",
                when: &[not(DomChanged), not(UrlChanged)],
                weight: 10,
                reason: "Flow step produced no visible progress",
            },
            Rule {
                id: "flow.console_errors",
                when: &[is(ConsoleErrors)],
                weight: 5,
                reason: "Console errors recorded during the flow",
            },
            Rule {
                id: "flow.repeated",
                when: &[is(Repeated)],
                weight: 10,
                reason: "Flow break reproduced on a repeated run",
            },
        ],
        penalties: &[
            Rule {
                id: "flow.progressed_with_feedback",
                when: &[is(UiFeedback), is(DomChanged)],
                weight: 15,
                reason: "Flow step showed feedback and updated the page",
            },
            Rule {
                id: "flow.capture_failed",
                when: &[is(CaptureFailed)],
                weight: 10,
                reason: "A sensor capture failed during the flow",
            },
        ],
    },
    RuleSet {
        finding_type: FindingType::ObservedBreak,
        base_score: 50,
        boosts: &[
            Rule {
                id: "observed.reproduced",
                when: &[is(Repeated)],
                weight: 15,
                reason: "Break reproduced across attempts",
            },
            Rule {
                id: "observed.console_errors",
                when: &[is(ConsoleErrors)],
                weight: 5,
                reason: "Console errors recorded at the break",
            },
            Rule {
                id: "observed.network_failed",
                when: &[is(NetworkFailed)],
                weight: 5,
                reason: "A network request failed at the break",
            },
        ],
        penalties: &[
            Rule {
                id: "observed.single_sighting",
                when: &[not(Repeated)],
                weight: 10,
                reason: "Break seen only once",
            },
            Rule {
                id: "observed.feedback_shown",
                when: &[is(UiFeedback)],
                weight: 10,
                reason: "UI feedback was shown",
            },
        ],
    },
];

/// Rule set for a finding type. `None` for `FindingType::Unknown`.
pub fn rules_for(finding_type: FindingType) -> Option<&'static RuleSet> {
    RULE_TABLE.iter().find(|set| set.finding_type == finding_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_scored_type_has_exactly_one_rule_set() {
        for ft in FindingType::SCORED {
            let count = RULE_TABLE.iter().filter(|s| s.finding_type == ft).count();
            assert_eq!(count, 1, "{ft} should have one rule set");
        }
        assert!(rules_for(FindingType::Unknown).is_none());
    }

    #[test]
    fn rule_ids_are_unique() {
        let mut seen = HashSet::new();
        for set in &RULE_TABLE {
            for rule in set.boosts.iter().chain(set.penalties) {
                assert!(seen.insert(rule.id), "duplicate rule id {}", rule.id);
                assert!(!rule.when.is_empty(), "{} has an empty predicate", rule.id);
            }
        }
    }

    #[test]
    fn conjunction_semantics() {
        let rule = &rules_for(FindingType::NetworkSilentFailure).unwrap().boosts[0];
        let mut s = EvidenceSignals { network_failed: true, ..Default::default() };
        assert!(rule.matches(&s));
        s.ui_feedback = true;
        assert!(!rule.matches(&s));
    }
}
