//! Programmatic configuration for integration tests

use std::path::Path;

use artgen_client::ArtgenClient;
use artgen_config::{Config, DownloadConfig};
use secrecy::SecretString;

/// Builder for test configurations pointed at a mock backend
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new(base_url: &str) -> Self {
        let mut config = Config::default();
        base_url.clone_into(&mut config.client.base_url);
        Self { config }
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.config.client.api_key = Some(SecretString::from(key.to_owned()));
        self
    }

    pub fn with_download_dir(mut self, dir: &Path) -> Self {
        self.config.downloads = DownloadConfig {
            directory: dir.to_path_buf(),
        };
        self
    }

    pub fn with_form(mut self, model: &str, count: &str) -> Self {
        model.clone_into(&mut self.config.form.model);
        count.clone_into(&mut self.config.form.count);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

/// Client wired the way the CLI wires it
pub fn client_from(config: &mut Config) -> anyhow::Result<ArtgenClient> {
    let client = ArtgenClient::new(&config.client.base_url)?.with_endpoint(config.client.endpoint.clone());

    Ok(match config.client.api_key.take() {
        Some(key) => client.with_api_key(&config.client.api_key_header, key)?,
        None => client,
    })
}
