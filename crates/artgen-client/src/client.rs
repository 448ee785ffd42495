use reqwest::header::HeaderName;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{GenerationError, Result};
use crate::types::{GenerationRequest, GenerationResult, HealthStatus};

/// Default generation endpoint path
const DEFAULT_ENDPOINT: &str = "/api/generate";

/// Health probe path
const HEALTH_PATH: &str = "/health";

/// API key and the header it travels in
#[derive(Debug, Clone)]
struct ApiKey {
    header: HeaderName,
    value: SecretString,
}

/// Typed client for the artgen backend
#[derive(Debug, Clone)]
pub struct ArtgenClient {
    base_url: Url,
    endpoint: String,
    http: reqwest::Client,
    api_key: Option<ApiKey>,
}

impl ArtgenClient {
    /// Create a new client pointing at the given origin
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| GenerationError::Config(format!("invalid base URL: {e}")))?;

        Ok(Self {
            base_url,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            http: reqwest::Client::new(),
            api_key: None,
        })
    }

    /// Override the generation endpoint path
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Send `key` in `header` on every request
    ///
    /// # Errors
    ///
    /// Returns an error if `header` is not a valid header name
    pub fn with_api_key(mut self, header: &str, key: SecretString) -> Result<Self> {
        let header = HeaderName::from_bytes(header.as_bytes())
            .map_err(|e| GenerationError::Config(format!("invalid API key header '{header}': {e}")))?;

        self.api_key = Some(ApiKey { header, value: key });
        Ok(self)
    }

    /// Origin the client talks to
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL of the generation endpoint
    #[must_use]
    pub fn endpoint_url(&self) -> Url {
        make_url(&self.base_url, &self.endpoint)
    }

    /// Post one generation request and parse the images out of the reply
    ///
    /// # Errors
    ///
    /// Returns `Http` on transport failure, `Api` with the resolved reason
    /// on a non-success status, and `Parse` if the success body is malformed
    pub async fn generate_images(&self, req: &GenerationRequest) -> Result<GenerationResult> {
        let url = self.endpoint_url();

        tracing::debug!(model = %req.model, n = ?req.n, size = %req.size, quality = %req.quality, "sending generation request");

        let response = self
            .request(reqwest::Method::POST, &url)
            .json(req)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "generation request failed"))?;

        let body = handle_error(response).await?.text().await?;

        let result: GenerationResult = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "failed to parse generation response");
            GenerationError::Parse(e.to_string())
        })?;

        tracing::debug!(count = result.images.len(), "generation request complete");

        Ok(result)
    }

    /// Probe the backend's health endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or unhealthy
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = make_url(&self.base_url, HEALTH_PATH);

        let response = self.request(reqwest::Method::GET, &url).send().await?;

        handle_error(response).await?.json().await.map_err(Into::into)
    }

    fn request(&self, method: reqwest::Method, url: &Url) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, url.as_str());

        if let Some(key) = &self.api_key {
            builder = builder.header(key.header.clone(), key.value.expose_secret());
        }

        builder
    }
}

fn make_url(base_url: &Url, path: &str) -> Url {
    let mut url = base_url.clone();
    url.set_path(path);
    url
}

/// Pass successful responses through; turn the rest into `Api` errors
async fn handle_error(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.ok();

    tracing::warn!(status = %status, "backend returned an error status");

    Err(GenerationError::from_response_body(status, body.as_deref()))
}
