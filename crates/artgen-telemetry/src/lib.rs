//! Logging for artgen
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either a
//! text or a JSON formatter, as chosen in `[telemetry]`.

use artgen_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when the configured directive does not parse
const FALLBACK_FILTER: &str = "info";

/// Initialize logging from configuration
///
/// `RUST_LOG`, when set, takes precedence over the configured filter.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), &config.filter);

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Text => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr);

            registry
                .with(fmt_layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;
        }
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_writer(std::io::stderr);

            registry
                .with(fmt_layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;
        }
    }

    Ok(())
}

/// Pick the effective filter: environment first, then configuration
fn build_filter(env: Option<&str>, configured: &str) -> EnvFilter {
    env.filter(|directive| !directive.trim().is_empty())
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_new(configured).ok())
        .unwrap_or_else(|| EnvFilter::new(FALLBACK_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_overrides_configuration() {
        let filter = build_filter(Some("artgen_ui=trace"), "warn");
        assert_eq!(filter.to_string(), "artgen_ui=trace");
    }

    #[test]
    fn blank_environment_is_ignored() {
        let filter = build_filter(Some("  "), "debug");
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn unparsable_filters_fall_back_to_info() {
        let filter = build_filter(None, "artgen=loudest");
        assert_eq!(filter.to_string(), "info");
    }
}
