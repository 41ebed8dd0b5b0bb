//! Named boolean evidence signals derived from comparisons and sensors.
//! Rule predicates only ever test these.

use serde::Serialize;
use silentwatch_core::types::{
    AttemptMeta, Comparisons, ConsoleSensor, Expectation, ExpectationKind, Sensors,
};

use crate::sensors::{console_has_data, network_has_data, SensorStates};

/// Addressable signal for declarative rule predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    UrlChanged,
    DomChanged,
    ScreenshotChanged,
    StateChanged,
    TargetReached,
    TargetMissed,
    NetworkFailed,
    NetworkSucceeded,
    NetworkSlow,
    NetworkActivity,
    /// Network channel supplied and recorded nothing.
    NetworkSilent,
    UiFeedback,
    ValidationFeedback,
    ConsoleErrors,
    PromisesNetwork,
    PromisesNavigation,
    PromisesState,
    Repeated,
    CaptureFailed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceSignals {
    pub url_changed: bool,
    pub dom_changed: bool,
    pub screenshot_changed: bool,
    pub state_changed: bool,
    pub target_reached: bool,
    pub target_missed: bool,
    pub network_failed: bool,
    pub network_succeeded: bool,
    pub network_slow: bool,
    pub network_activity: bool,
    pub network_silent: bool,
    pub ui_feedback: bool,
    pub validation_feedback: bool,
    pub console_errors: bool,
    pub promises_network: bool,
    pub promises_navigation: bool,
    pub promises_state: bool,
    pub repeated: bool,
    pub capture_failed: bool,
}

impl EvidenceSignals {
    pub fn derive(
        expectation: Option<&Expectation>,
        sensors: &Sensors,
        comparisons: &Comparisons,
        attempt: &AttemptMeta,
    ) -> Self {
        let states = SensorStates::from_sensors(sensors);
        let network = sensors.network.as_ref();
        let ui = sensors.ui_signals.as_ref();
        let kind = expectation.map(|e| e.kind);

        Self {
            url_changed: comparisons.url_changed,
            dom_changed: comparisons.dom_changed,
            screenshot_changed: comparisons.screenshot_changed,
            state_changed: comparisons.state_changed,
            target_reached: comparisons.target_reached == Some(true),
            target_missed: comparisons.target_reached == Some(false),
            network_failed: network.is_some_and(|n| n.failed_requests > 0 || !n.failed_urls.is_empty()),
            network_succeeded: network.is_some_and(|n| n.successful_requests > 0),
            network_slow: network.is_some_and(|n| n.slow_requests > 0 || !n.slow_urls.is_empty()),
            network_activity: network.is_some_and(network_has_data),
            network_silent: network.is_some_and(|n| !n.capture_failed && !network_has_data(n)),
            ui_feedback: ui.is_some_and(|u| u.shows_feedback()),
            validation_feedback: ui.is_some_and(|u| u.validation_feedback),
            console_errors: sensors.console.as_ref().is_some_and(has_console_errors),
            promises_network: kind == Some(ExpectationKind::NetworkAction),
            promises_navigation: kind == Some(ExpectationKind::Navigation),
            promises_state: kind == Some(ExpectationKind::StateAction),
            repeated: attempt.repeated,
            capture_failed: states.any_failed(),
        }
    }

    pub fn get(&self, signal: Signal) -> bool {
        match signal {
            Signal::UrlChanged => self.url_changed,
            Signal::DomChanged => self.dom_changed,
            Signal::ScreenshotChanged => self.screenshot_changed,
            Signal::StateChanged => self.state_changed,
            Signal::TargetReached => self.target_reached,
            Signal::TargetMissed => self.target_missed,
            Signal::NetworkFailed => self.network_failed,
            Signal::NetworkSucceeded => self.network_succeeded,
            Signal::NetworkSlow => self.network_slow,
            Signal::NetworkActivity => self.network_activity,
            Signal::NetworkSilent => self.network_silent,
            Signal::UiFeedback => self.ui_feedback,
            Signal::ValidationFeedback => self.validation_feedback,
            Signal::ConsoleErrors => self.console_errors,
            Signal::PromisesNetwork => self.promises_network,
            Signal::PromisesNavigation => self.promises_navigation,
            Signal::PromisesState => self.promises_state,
            Signal::Repeated => self.repeated,
            Signal::CaptureFailed => self.capture_failed,
        }
    }

    /// Names of the signals that are set, in declaration order.
    pub fn active(&self) -> Vec<&'static str> {
        let all: [(&'static str, bool); 19] = [
            ("urlChanged", self.url_changed),
            ("domChanged", self.dom_changed),
            ("screenshotChanged", self.screenshot_changed),
            ("stateChanged", self.state_changed),
            ("targetReached", self.target_reached),
            ("targetMissed", self.target_missed),
            ("networkFailed", self.network_failed),
            ("networkSucceeded", self.network_succeeded),
            ("networkSlow", self.network_slow),
            ("networkActivity", self.network_activity),
            ("networkSilent", self.network_silent),
            ("uiFeedback", self.ui_feedback),
            ("validationFeedback", self.validation_feedback),
            ("consoleErrors", self.console_errors),
            ("promisesNetwork", self.promises_network),
            ("promisesNavigation", self.promises_navigation),
            ("promisesState", self.promises_state),
            ("repeated", self.repeated),
            ("captureFailed", self.capture_failed),
        ];
        all.into_iter().filter(|(_, on)| *on).map(|(name, _)| name).collect()
    }
}

fn has_console_errors(c: &ConsoleSensor) -> bool {
    if !console_has_data(c) {
        return false;
    }
    c.error_count > 0
        || c.messages
            .iter()
            .chain(c.log_entries.iter())
            .any(|m| m.level.eq_ignore_ascii_case("error"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use silentwatch_core::types::{NetworkSensor, UiSignalSensor};

    #[test]
    fn silent_network_requires_supplied_channel() {
        let absent = EvidenceSignals::derive(None, &Sensors::default(), &Comparisons::default(), &AttemptMeta::default());
        assert!(!absent.network_silent);

        let sensors = Sensors {
            network: Some(NetworkSensor::default()),
            ..Default::default()
        };
        let supplied = EvidenceSignals::derive(None, &sensors, &Comparisons::default(), &AttemptMeta::default());
        assert!(supplied.network_silent);
        assert!(!supplied.network_activity);
    }

    #[test]
    fn target_reached_is_tristate() {
        let unchecked = Comparisons::default();
        let s = EvidenceSignals::derive(None, &Sensors::default(), &unchecked, &AttemptMeta::default());
        assert!(!s.target_reached && !s.target_missed);

        let missed = Comparisons { target_reached: Some(false), ..Default::default() };
        let s = EvidenceSignals::derive(None, &Sensors::default(), &missed, &AttemptMeta::default());
        assert!(s.target_missed);
        assert!(s.get(Signal::TargetMissed));
    }

    #[test]
    fn active_lists_set_signals_in_order() {
        let sensors = Sensors {
            ui_signals: Some(UiSignalSensor { dialog_opened: true, ..Default::default() }),
            ..Default::default()
        };
        let comparisons = Comparisons { url_changed: true, ..Default::default() };
        let s = EvidenceSignals::derive(None, &sensors, &comparisons, &AttemptMeta { repeated: true, attempts: 2 });
        assert_eq!(s.active(), vec!["urlChanged", "uiFeedback", "repeated"]);
    }
}
