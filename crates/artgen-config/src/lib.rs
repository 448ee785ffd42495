#![allow(clippy::must_use_candidate)]

//! Configuration for the artgen client and its headless UI

pub mod client;
pub mod downloads;
mod env;
pub mod form;
mod loader;
pub mod notifications;
pub mod telemetry;

use serde::Deserialize;

pub use client::*;
pub use downloads::*;
pub use form::*;
pub use notifications::*;
pub use telemetry::*;

/// Top-level artgen configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub client: ClientConfig,
    /// Initial form values
    #[serde(default)]
    pub form: FormConfig,
    /// Toast timing
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Where downloaded images land
    #[serde(default)]
    pub downloads: DownloadConfig,
    /// Log output
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
