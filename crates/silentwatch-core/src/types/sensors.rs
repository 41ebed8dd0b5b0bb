//! Per-channel sensor summaries supplied by the observation collaborator.
//!
//! A channel may be absent (`None`), present but empty, or populated.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkSensor {
    pub total_requests: u32,
    pub successful_requests: u32,
    pub failed_requests: u32,
    pub slow_requests: u32,
    pub failed_urls: Vec<String>,
    pub slow_urls: Vec<String>,
    pub capture_failed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsoleMessage {
    pub level: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsoleSensor {
    pub messages: Vec<ConsoleMessage>,
    pub error_count: u32,
    pub warning_count: u32,
    pub log_entries: Vec<ConsoleMessage>,
    pub capture_failed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiSignalSensor {
    pub structural_change: bool,
    pub visible_change: bool,
    pub aria_changed: bool,
    pub focus_changed: bool,
    pub text_changed: bool,
    pub validation_feedback: bool,
    pub status_region_change: bool,
    pub live_region_change: bool,
    pub dialog_opened: bool,
    pub loading_indicator: bool,
    pub capture_failed: bool,
}

impl UiSignalSensor {
    /// Any user-perceivable feedback: a UI delta or an explicit feedback surface.
    pub fn shows_feedback(&self) -> bool {
        self.structural_change
            || self.visible_change
            || self.aria_changed
            || self.focus_changed
            || self.text_changed
            || self.validation_feedback
            || self.status_region_change
            || self.live_region_change
            || self.dialog_opened
            || self.loading_indicator
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sensors {
    pub network: Option<NetworkSensor>,
    pub console: Option<ConsoleSensor>,
    pub ui_signals: Option<UiSignalSensor>,
}
