use std::path::Path;

use url::Url;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// `{{ env.VAR }}` placeholders are expanded before parsing and the
    /// result is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// resolved, the TOML is malformed, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the backend address or toast timing is invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_client()?;
        self.validate_notifications()?;
        Ok(())
    }

    fn validate_client(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.client.base_url)
            .map_err(|e| anyhow::anyhow!("client.base_url '{}' is not a valid URL: {e}", self.client.base_url))?;

        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("client.base_url must use http or https, got '{}'", url.scheme());
        }

        if !self.client.endpoint.starts_with('/') {
            anyhow::bail!("client.endpoint must start with '/', got '{}'", self.client.endpoint);
        }

        if self.client.api_key_header.trim().is_empty() {
            anyhow::bail!("client.api_key_header must not be empty");
        }

        Ok(())
    }

    fn validate_notifications(&self) -> anyhow::Result<()> {
        if self.notifications.visible_duration()?.is_zero() {
            anyhow::bail!("notifications.visible must be greater than zero");
        }

        self.notifications.fade_duration()?;

        Ok(())
    }
}
