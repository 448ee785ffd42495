use serde::Deserialize;

/// Values the form starts with
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormConfig {
    /// Initially selected model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Initial content of the count input
    #[serde(default = "default_count")]
    pub count: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            count: default_count(),
        }
    }
}

fn default_model() -> String {
    "gpt-image-1".to_string()
}

fn default_count() -> String {
    "1".to_string()
}
