//! LLM provider clients for the meeting-recall pipeline.
//!
//! Two concerns live here:
//! - **Answer synthesis** via the Anthropic messages API (non-streaming).
//! - **Embeddings** via a local Ollama server.
//!
//! Configs are built strictly from environment variables (see
//! [`config::default_config`]) and validated before any network call.
//! [`service::LlmServices`] bundles both clients behind one handle;
//! construct it once, wrap in `Arc`, and pass clones to dependents.

pub mod config;
pub mod error;
pub mod service;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error::{ConfigError, LlmError};
pub use service::LlmServices;
