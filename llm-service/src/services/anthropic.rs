//! Anthropic (Claude) service for answer synthesis.
//!
//! Minimal, non-streaming client around the Anthropic messages API:
//! - `POST {endpoint}/v1/messages`: single message completion
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::Anthropic`
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized via the unified types in [`crate::error`].

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error::{ConfigError, LlmError, make_snippet},
};

/// API version header required by the messages endpoint.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Thin client for the Anthropic messages API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (timeout and default headers).
#[derive(Debug)]
pub struct AnthropicService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_messages: String,
}

impl AnthropicService {
    /// Creates a new [`AnthropicService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::MissingVar`] if `cfg.api_key` is `None`
    /// - [`ConfigError::InvalidFormat`] if `cfg.endpoint` is invalid
    /// - [`LlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, LlmError> {
        debug_assert!(cfg.provider == LlmProvider::Anthropic);

        let api_key = cfg
            .api_key
            .clone()
            .ok_or(ConfigError::MissingVar("ANTHROPIC_API_KEY"))?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ConfigError::InvalidFormat {
                var: "ANTHROPIC_URL",
                reason: "must start with http:// or https://",
            }
            .into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            header::HeaderValue::from_str(&api_key).map_err(|e| {
                LlmError::Decode(format!("invalid API key header: {e}"))
            })?,
        );
        headers.insert(
            "anthropic-version",
            header::HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_messages = format!("{}/v1/messages", base);

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "AnthropicService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_messages,
        })
    }

    /// Performs a **non-streaming** message completion request
    /// (`/v1/messages`).
    ///
    /// The request carries a single user message with `prompt` and an
    /// optional top-level `system` instruction. Mapped options from config:
    /// `model`, `temperature`, `max_tokens`.
    ///
    /// Returns the concatenated text blocks of the response content.
    ///
    /// # Errors
    /// - [`LlmError::HttpStatus`] for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client/network failures
    /// - [`LlmError::Decode`] if the JSON cannot be parsed
    /// - [`LlmError::EmptyContent`] if no text blocks are returned
    pub async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        let started = Instant::now();
        let body = MessagesRequest::from_cfg(&self.cfg, prompt, system);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            has_system = system.is_some(),
            "POST {}", self.url_messages
        );

        let resp = self
            .client
            .post(&self.url_messages)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_messages.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Anthropic /v1/messages returned non-success status"
            );

            return Err(LlmError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: MessagesResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode /v1/messages response"
                );
                return Err(LlmError::Decode(format!(
                    "serde error: {e}; expected `content[].text`"
                )));
            }
        };

        let answer = extract_text(out);
        if answer.is_empty() {
            return Err(LlmError::EmptyContent);
        }

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            "message completion completed"
        );

        Ok(answer)
    }
}

/// Joins the `text` blocks of a response into a single answer string.
fn extract_text(resp: MessagesResponse) -> String {
    resp.content
        .into_iter()
        .filter_map(|b| match b {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .collect::<Vec<_>>()
        .join("")
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Minimal request body for `/v1/messages` (non-streaming).
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<Message<'a>>,
}

impl<'a> MessagesRequest<'a> {
    /// Builds a minimal request from config, `prompt`, and an optional
    /// system instruction.
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        Self {
            model: &cfg.model,
            // The messages API requires max_tokens; 1024 is a safe floor.
            max_tokens: cfg.max_tokens.unwrap_or(1024),
            temperature: cfg.temperature,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        }
    }
}

/// A single chat message.
#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal response for `/v1/messages`.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

/// Response content block; only `text` blocks carry the answer.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(api_key: Option<String>) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Anthropic,
            model: "claude-3-5-sonnet-20240620".into(),
            endpoint: "https://api.anthropic.com".into(),
            api_key,
            max_tokens: Some(1000),
            temperature: Some(0.0),
            timeout_secs: Some(60),
        }
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let err = AnthropicService::new(cfg(None)).unwrap_err();
        assert!(matches!(
            err,
            LlmError::Config(ConfigError::MissingVar("ANTHROPIC_API_KEY"))
        ));
    }

    #[test]
    fn request_body_shape() {
        let cfg = cfg(Some("k".into()));
        let body = MessagesRequest::from_cfg(&cfg, "question", Some("you are an assistant"));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "claude-3-5-sonnet-20240620");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["system"], "you are an assistant");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "question");
    }

    #[test]
    fn system_is_omitted_when_absent() {
        let cfg = cfg(Some("k".into()));
        let body = MessagesRequest::from_cfg(&cfg, "q", None);
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("system").is_none());
    }

    #[test]
    fn text_blocks_are_concatenated() {
        let resp: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"text","text":"Hello "},{"type":"tool_use","id":"x","name":"n","input":{}},{"type":"text","text":"world"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(resp), "Hello world");
    }

    #[test]
    fn empty_content_yields_empty_string() {
        let resp: MessagesResponse = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert_eq!(extract_text(resp), "");
    }
}
