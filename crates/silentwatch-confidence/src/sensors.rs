//! Sensor state normalization: ABSENT / FAILED / EMPTY / PRESENT per channel.
//!
//! The presence booleans computed here gate HIGH-confidence eligibility, so
//! the per-channel predicates must stay exactly as written.

use serde::{Deserialize, Serialize};
use silentwatch_core::types::{ConsoleSensor, NetworkSensor, Sensors, UiSignalSensor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorState {
    /// No payload supplied.
    Absent,
    /// Payload supplied but capture explicitly failed.
    Failed,
    /// Payload supplied with no meaningful signal.
    Empty,
    /// Meaningful signal found.
    Present,
}

impl SensorState {
    pub fn has_data(self) -> bool {
        self == Self::Present
    }
}

/// Classify a channel payload using its presence predicate.
pub fn classify<T>(
    payload: Option<&T>,
    capture_failed: impl Fn(&T) -> bool,
    has_meaningful_data: impl Fn(&T) -> bool,
) -> SensorState {
    match payload {
        None => SensorState::Absent,
        Some(p) if capture_failed(p) => SensorState::Failed,
        Some(p) if has_meaningful_data(p) => SensorState::Present,
        Some(_) => SensorState::Empty,
    }
}

pub fn network_has_data(n: &NetworkSensor) -> bool {
    n.total_requests > 0
        || n.successful_requests > 0
        || n.failed_requests > 0
        || n.slow_requests > 0
        || !n.failed_urls.is_empty()
        || !n.slow_urls.is_empty()
}

pub fn console_has_data(c: &ConsoleSensor) -> bool {
    !c.messages.is_empty() || c.error_count > 0 || c.warning_count > 0 || !c.log_entries.is_empty()
}

pub fn ui_has_data(u: &UiSignalSensor) -> bool {
    u.structural_change || u.visible_change || u.aria_changed || u.focus_changed || u.text_changed
}

/// Normalized state of all three channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorStates {
    pub network: SensorState,
    pub console: SensorState,
    pub ui: SensorState,
}

impl SensorStates {
    pub fn from_sensors(sensors: &Sensors) -> Self {
        Self {
            network: classify(sensors.network.as_ref(), |n| n.capture_failed, network_has_data),
            console: classify(sensors.console.as_ref(), |c| c.capture_failed, console_has_data),
            ui: classify(sensors.ui_signals.as_ref(), |u| u.capture_failed, ui_has_data),
        }
    }

    pub fn presence(&self) -> SensorPresence {
        SensorPresence {
            network: self.network.has_data(),
            console: self.console.has_data(),
            ui: self.ui.has_data(),
        }
    }

    /// Every channel object was supplied, whatever its content.
    pub fn all_supplied(&self) -> bool {
        self.iter().all(|s| s != SensorState::Absent)
    }

    /// At least one channel object was not supplied.
    pub fn any_absent(&self) -> bool {
        !self.all_supplied()
    }

    pub fn any_failed(&self) -> bool {
        self.iter().any(|s| s == SensorState::Failed)
    }

    fn iter(&self) -> impl Iterator<Item = SensorState> {
        [self.network, self.console, self.ui].into_iter()
    }
}

/// "Has meaningful data" flags per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorPresence {
    pub network: bool,
    pub console: bool,
    pub ui: bool,
}

impl SensorPresence {
    pub fn all(&self) -> bool {
        self.network && self.console && self.ui
    }

    pub fn none(&self) -> bool {
        !self.network && !self.console && !self.ui
    }

    /// Channel names with data, in fixed network/console/UI order.
    pub fn present_channels(&self) -> Vec<&'static str> {
        let mut out = Vec::with_capacity(3);
        if self.network {
            out.push("network");
        }
        if self.console {
            out.push("console");
        }
        if self.ui {
            out.push("UI");
        }
        out
    }

    /// Channel names without data, in the same fixed order.
    pub fn missing_channels(&self) -> Vec<&'static str> {
        let mut out = Vec::with_capacity(3);
        if !self.network {
            out.push("network");
        }
        if !self.console {
            out.push("console");
        }
        if !self.ui {
            out.push("UI");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use silentwatch_core::types::ConsoleMessage;

    #[test]
    fn absent_empty_present_failed() {
        let sensors = Sensors {
            network: Some(NetworkSensor {
                failed_urls: vec!["/api/save".into()],
                ..Default::default()
            }),
            console: Some(ConsoleSensor::default()),
            ui_signals: None,
        };
        let states = SensorStates::from_sensors(&sensors);
        assert_eq!(states.network, SensorState::Present);
        assert_eq!(states.console, SensorState::Empty);
        assert_eq!(states.ui, SensorState::Absent);
        assert!(states.any_absent());

        let failed = ConsoleSensor {
            capture_failed: true,
            messages: vec![ConsoleMessage { level: "error".into(), text: "x".into() }],
            ..Default::default()
        };
        assert_eq!(
            classify(Some(&failed), |c| c.capture_failed, console_has_data),
            SensorState::Failed
        );
    }

    #[test]
    fn ui_presence_ignores_feedback_only_surfaces() {
        let ui = UiSignalSensor {
            dialog_opened: true,
            ..Default::default()
        };
        assert!(!ui_has_data(&ui));
        assert!(ui.shows_feedback());
    }

    #[test]
    fn presence_channel_lists_keep_order() {
        let p = SensorPresence { network: true, console: false, ui: true };
        assert_eq!(p.present_channels(), vec!["network", "UI"]);
        assert_eq!(p.missing_channels(), vec!["console"]);
        assert!(!p.all());
        assert!(!p.none());
    }
}
