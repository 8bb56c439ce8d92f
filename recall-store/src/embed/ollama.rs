//! Ollama embedding provider implementation.
//!
//! Delegates to the shared [`LlmServices`] embedding profile and validates
//! the returned dimensionality against the collection's vector space.

use std::sync::Arc;

use crate::embed::EmbeddingsProvider;
use crate::errors::StoreError;
use llm_service::LlmServices;

/// Ollama embedding provider (async).
#[derive(Clone)]
pub struct OllamaEmbedder {
    svc: Arc<LlmServices>,
    dim: usize,
}

impl OllamaEmbedder {
    /// Construct a new embedder over the shared LLM services.
    pub fn new(svc: Arc<LlmServices>, dim: usize) -> Self {
        Self { svc, dim }
    }
}

impl EmbeddingsProvider for OllamaEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>>
    {
        Box::pin(async move {
            let vector = self.svc.embed(text).await?;
            if vector.len() != self.dim {
                return Err(StoreError::VectorSizeMismatch {
                    got: vector.len(),
                    want: self.dim,
                });
            }
            Ok(vector)
        })
    }
}
