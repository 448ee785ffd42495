use async_trait::async_trait;

use crate::{
    client::ArtgenClient,
    error::Result,
    types::{GenerationRequest, GenerationResult},
};

/// Something that turns a generation request into images
///
/// Implemented by [`ArtgenClient`] for the real backend; the UI controller
/// only depends on this trait.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Run one generation round-trip
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult>;
}

#[async_trait]
impl GenerationBackend for ArtgenClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        self.generate_images(request).await
    }
}
