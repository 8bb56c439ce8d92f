/// Represents the provider (backend) used for a model invocation.
///
/// This enum distinguishes between the local Ollama runtime (embeddings)
/// and the Anthropic messages API (answer synthesis).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// Local Ollama runtime, used here for embeddings.
    Ollama,
    /// Anthropic messages API (Claude), used here for answer synthesis.
    Anthropic,
}
