#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Typed HTTP client for the artgen image generation backend
//!
//! Speaks the `POST /api/generate` contract and resolves error bodies into
//! the human-readable message shown to users

mod backend;
mod client;
pub mod error;
pub mod types;

pub use backend::GenerationBackend;
pub use client::ArtgenClient;
pub use error::{GENERIC_FAILURE, GenerationError, Result};
pub use types::*;
