//! Evidence Law: a CONFIRMED finding must rest on substantive evidence.

use silentwatch_core::types::{Comparisons, ConsoleSensor, EvidencePackage, NetworkSensor, Sensors, UiSignalSensor};
use silentwatch_core::TruthStatus;
use tracing::info;

use crate::invariants::InvariantCode;

pub const EVIDENCE_LAW_NOTE: &str =
    "Downgraded from CONFIRMED to SUSPECTED: no substantive evidence supports the finding.";

/// Whether at least one channel carries evidence of what actually happened.
///
/// Channels whose capture failed do not count, even if they carry partial data.
pub fn has_substantive_evidence(evidence: Option<&EvidencePackage>, comparisons: &Comparisons, sensors: &Sensors) -> bool {
    let captured = evidence.is_some_and(|e| e.is_complete || e.has_screenshot_pair() || e.url_changed() || e.dom_changed());
    let changed = comparisons.url_changed || comparisons.dom_changed || comparisons.screenshot_changed;

    captured
        || changed
        || sensors.network.as_ref().is_some_and(network_is_substantive)
        || sensors.console.as_ref().is_some_and(console_is_substantive)
        || sensors.ui_signals.as_ref().is_some_and(ui_is_substantive)
}

fn network_is_substantive(n: &NetworkSensor) -> bool {
    !n.capture_failed
        && (n.total_requests > 0 || n.successful_requests > 0 || n.failed_requests > 0 || !n.failed_urls.is_empty())
}

fn console_is_substantive(c: &ConsoleSensor) -> bool {
    !c.capture_failed
        && (c.error_count > 0 || c.warning_count > 0 || !c.messages.is_empty() || !c.log_entries.is_empty())
}

fn ui_is_substantive(u: &UiSignalSensor) -> bool {
    !u.capture_failed
        && (u.structural_change
            || u.validation_feedback
            || u.status_region_change
            || u.live_region_change
            || u.dialog_opened)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvidenceLawOutcome {
    pub status: TruthStatus,
    pub downgraded: bool,
}

impl EvidenceLawOutcome {
    pub fn invariant(&self) -> Option<InvariantCode> {
        self.downgraded.then_some(InvariantCode::EvidenceRequiredForConfirmed)
    }

    pub fn note(&self) -> Option<&'static str> {
        self.downgraded.then_some(EVIDENCE_LAW_NOTE)
    }
}

/// Downgrade CONFIRMED to SUSPECTED when nothing substantive backs it.
/// Every other status passes through.
pub fn apply(status: TruthStatus, substantive: bool) -> EvidenceLawOutcome {
    if status == TruthStatus::Confirmed && !substantive {
        info!(from = %status, to = %TruthStatus::Suspected, "Evidence law downgrade");
        return EvidenceLawOutcome {
            status: TruthStatus::Suspected,
            downgraded: true,
        };
    }
    EvidenceLawOutcome {
        status,
        downgraded: false,
    }
}
