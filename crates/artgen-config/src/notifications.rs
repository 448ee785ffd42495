use std::time::Duration;

use serde::Deserialize;

/// Toast timing configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationConfig {
    /// How long a toast stays fully visible (e.g. "4s")
    #[serde(default = "default_visible")]
    pub visible: String,
    /// Fade-out time after the visible period (e.g. "300ms")
    #[serde(default = "default_fade")]
    pub fade: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            visible: default_visible(),
            fade: default_fade(),
        }
    }
}

impl NotificationConfig {
    /// Parsed visible period
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid duration
    pub fn visible_duration(&self) -> anyhow::Result<Duration> {
        parse_duration("notifications.visible", &self.visible)
    }

    /// Parsed fade-out period
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid duration
    pub fn fade_duration(&self) -> anyhow::Result<Duration> {
        parse_duration("notifications.fade", &self.fade)
    }
}

fn parse_duration(field: &str, s: &str) -> anyhow::Result<Duration> {
    duration_str::parse(s).map_err(|e| anyhow::anyhow!("invalid duration for {field} '{s}': {e}"))
}

fn default_visible() -> String {
    "4s".to_string()
}

fn default_fade() -> String {
    "300ms".to_string()
}
