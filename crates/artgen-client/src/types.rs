use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

// -- Enumerations --

/// Image generation model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
pub enum ImageModel {
    /// GPT Image, medium quality only
    #[serde(rename = "gpt-image-1")]
    #[strum(serialize = "gpt-image-1")]
    GptImage1,
    /// DALL-E 3, standard or hd
    #[serde(rename = "dall-e-3")]
    #[strum(serialize = "dall-e-3")]
    DallE3,
    /// DALL-E 2, the only model offering small sizes
    #[serde(rename = "dall-e-2")]
    #[strum(serialize = "dall-e-2")]
    DallE2,
}

/// Output dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
pub enum ImageSize {
    #[serde(rename = "256x256")]
    #[strum(serialize = "256x256")]
    Small,
    #[serde(rename = "512x512")]
    #[strum(serialize = "512x512")]
    Medium,
    #[serde(rename = "1024x1024")]
    #[strum(serialize = "1024x1024")]
    Square,
    #[serde(rename = "1792x1024")]
    #[strum(serialize = "1792x1024")]
    Landscape,
    #[serde(rename = "1024x1792")]
    #[strum(serialize = "1024x1792")]
    Portrait,
}

/// Rendering quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImageQuality {
    Standard,
    Hd,
    Medium,
}

/// Encoding requested from the backend; the form only ever asks for PNG
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
}

/// Background treatment; the form only ever asks for `auto`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Auto,
}

// -- Request --

/// Body of `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    /// Model identifier
    pub model: ImageModel,
    /// Trimmed, non-empty prompt
    pub prompt: String,
    /// Requested image count; `null` when the count input does not parse
    pub n: Option<i64>,
    /// Output dimensions
    pub size: ImageSize,
    /// Rendering quality
    pub quality: ImageQuality,
    /// Always `png`
    pub format: ImageFormat,
    /// Always `auto`
    pub background: Background,
}

impl GenerationRequest {
    /// Build a request with the fixed format and background
    pub fn new(model: ImageModel, prompt: String, n: Option<i64>, size: ImageSize, quality: ImageQuality) -> Self {
        Self {
            model,
            prompt,
            n,
            size,
            quality,
            format: ImageFormat::Png,
            background: Background::Auto,
        }
    }
}

// -- Response --

/// Parsed success body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Generated images in backend order
    pub images: Vec<ImageRecord>,
    /// Backend request identifier
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Unix timestamp of the generation
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub created: Option<u64>,
    /// Model the backend actually used
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Token accounting
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// One generated image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Base64-encoded image bytes
    pub b64_json: String,
    /// File type tag, e.g. `png`
    pub filetype: String,
    /// Dimensions reported by the backend
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl ImageRecord {
    /// `data:` URI for displaying or downloading the image
    pub fn data_uri(&self) -> String {
        data_uri(&self.filetype, &self.b64_json)
    }
}

/// Token usage reported by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub image_tokens: u64,
    pub total_tokens: u64,
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    /// `ok` when the backend is up
    pub status: String,
    /// Backend version
    #[serde(default)]
    pub api_version: Option<String>,
}

/// Optional metadata that does not match its type is dropped, not fatal
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Assemble `data:image/<filetype>;base64,<payload>`
pub fn data_uri(filetype: &str, b64: &str) -> String {
    format!("data:image/{filetype};base64,{b64}")
}
