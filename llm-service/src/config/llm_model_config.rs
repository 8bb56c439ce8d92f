use crate::config::llm_provider::LlmProvider;

/// Configuration for a single model invocation profile.
///
/// The same struct is used for both providers; fields that a provider does
/// not understand stay `None` (e.g., `api_key` for Ollama).
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The provider/backend (Ollama or Anthropic).
    pub provider: LlmProvider,

    /// Model identifier string (e.g., `"all-minilm"`,
    /// `"claude-3-5-sonnet-20240620"`).
    pub model: String,

    /// Inference endpoint (local server or remote API URL).
    pub endpoint: String,

    /// Optional API key for providers that require authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate (mandatory for Anthropic).
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 = deterministic).
    pub temperature: Option<f32>,

    /// Optional request timeout in seconds.
    pub timeout_secs: Option<u64>,
}
