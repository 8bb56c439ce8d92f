//! Default LLM configs loaded strictly from environment variables.
//!
//! Two profiles are needed by the pipeline:
//!
//! - **Answer** → Anthropic messages API, deterministic (temperature 0)
//! - **Embedding** → Ollama embedding model shared by ingest and query
//!
//! # Environment variables
//!
//! Anthropic:
//! - `ANTHROPIC_API_KEY` = API credential (mandatory, checked before any
//!   network call)
//! - `ANTHROPIC_URL`     = API base URL (default `https://api.anthropic.com`)
//! - `ANTHROPIC_MODEL`   = model id (default `claude-3-5-sonnet-20240620`)
//! - `LLM_MAX_TOKENS`    = optional max tokens (u32, default 1000)
//!
//! Ollama:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (default `http://localhost:11434`)
//! - `EMBEDDING_MODEL`             = embedding model (default `all-minilm`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error::{ConfigError, LlmError, env_opt_u32, must_env, validate_http_endpoint},
};

/// Default Anthropic API base URL.
pub const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com";

/// Default answer model.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20240620";

/// Default answer token limit.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default embedding model (384-dimensional MiniLM).
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";

/// Resolves the Ollama endpoint from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
/// 3. [`DEFAULT_OLLAMA_URL`]
///
/// # Errors
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
/// - [`ConfigError::InvalidFormat`] if the resolved URL has no HTTP scheme
fn ollama_endpoint() -> Result<String, LlmError> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            validate_http_endpoint("OLLAMA_URL", &url)?;
            return Ok(url);
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let _ = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Ok(DEFAULT_OLLAMA_URL.to_string())
}

/// Constructs the config for the **answer** profile (Anthropic).
///
/// The API key is mandatory; a missing or empty `ANTHROPIC_API_KEY` is a
/// hard configuration error raised here, before any network attempt.
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic answers)
/// - `max_tokens = Some(1000)`
/// - `timeout_secs = Some(60)`
pub fn config_anthropic_answer() -> Result<LlmModelConfig, LlmError> {
    let api_key = must_env("ANTHROPIC_API_KEY")?;

    let endpoint = std::env::var("ANTHROPIC_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ANTHROPIC_URL.to_string());
    validate_http_endpoint("ANTHROPIC_URL", &endpoint)?;

    let model = std::env::var("ANTHROPIC_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string());

    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS);

    Ok(LlmModelConfig {
        provider: LlmProvider::Anthropic,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens: Some(max_tokens),
        temperature: Some(0.0),
        timeout_secs: Some(60),
    })
}

/// Constructs the config for the **embedding** profile (Ollama).
///
/// Ingest and query must share this profile so their vectors live in the
/// same embedding space.
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic)
/// - `timeout_secs = Some(30)`
pub fn config_ollama_embedding() -> Result<LlmModelConfig, LlmError> {
    let endpoint = ollama_endpoint()?;
    let model = std::env::var("EMBEDDING_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens: None,
        temperature: Some(0.0),
        timeout_secs: Some(30),
    })
}
