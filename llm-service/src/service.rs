//! Shared LLM service with two profiles: `answer` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Clients are built eagerly from their configs, so configuration
//!   problems (missing API key, bad endpoint) surface at startup rather
//!   than mid-pipeline.
//! - The answer profile is optional: ingestion only embeds and must not
//!   require the Anthropic credential.

use crate::{
    config::llm_model_config::LlmModelConfig,
    error::{ConfigError, LlmError},
    services::{anthropic::AnthropicService, ollama::OllamaService},
};

/// Shared service bundling the **answer** (Anthropic) and **embedding**
/// (Ollama) profiles behind one handle.
pub struct LlmServices {
    answer: Option<AnthropicService>,
    embedding: OllamaService,
}

impl LlmServices {
    /// Creates the service from the profile configs.
    ///
    /// - `answer_opt`: optional answer profile; pass `None` on paths that
    ///   never complete (ingestion).
    /// - `embedding`: required embedding profile.
    ///
    /// # Errors
    /// Returns [`LlmError`] if either client fails validation or
    /// construction.
    pub fn new(
        answer_opt: Option<LlmModelConfig>,
        embedding: LlmModelConfig,
    ) -> Result<Self, LlmError> {
        let answer = answer_opt.map(AnthropicService::new).transpose()?;
        Ok(Self {
            answer,
            embedding: OllamaService::new(embedding)?,
        })
    }

    /// Synthesizes an answer using the **answer** profile.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingVar`] if the service was built
    /// without an answer profile, or [`LlmError`] if the completion fails.
    pub async fn answer(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        let svc = self
            .answer
            .as_ref()
            .ok_or(ConfigError::MissingVar("ANTHROPIC_API_KEY"))?;
        svc.complete(prompt, system).await
    }

    /// Computes an embedding using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`LlmError`] if the embedding call fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, LlmError> {
        self.embedding.embeddings(input).await
    }
}
