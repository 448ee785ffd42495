use secrecy::SecretString;
use serde::Deserialize;

/// Backend connection configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Origin of the generation backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the generation endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Optional API key sent with every request
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Header carrying the API key
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            api_key: None,
            api_key_header: default_api_key_header(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_endpoint() -> String {
    "/api/generate".to_string()
}

fn default_api_key_header() -> String {
    "x-api-key".to_string()
}
