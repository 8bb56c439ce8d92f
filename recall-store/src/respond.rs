//! Answer synthesis: turn retrieved context into a completion request.
//!
//! The retrieved entries are serialized into the user message together
//! with the original query; the model is instructed to answer from the
//! results only and to say explicitly when they are insufficient. An empty
//! result set still issues the completion call, so the "insufficient
//! information" reply comes from the model rather than from a local
//! shortcut.

use llm_service::LlmServices;
use tracing::debug;

use crate::embed::EmbeddingsProvider;
use crate::errors::StoreError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::ContextEntry;
use crate::retrieve::query_context;

/// Fixed system instruction framing the assistant's role.
pub const SYSTEM_PROMPT: &str =
    "You are an AI assistant tasked with answering queries based on search results.";

/// Builds the user message for the completion request.
///
/// # Errors
/// Returns `StoreError::Parse` if the entries fail to serialize.
pub fn build_prompt(query: &str, entries: &[ContextEntry]) -> Result<String, StoreError> {
    let results = serde_json::to_string_pretty(entries)?;
    Ok(format!(
        "Based on the following search results, please provide a concise answer to the query: '{query}'\n\n\
         Search Results:\n{results}\n\n\
         Please synthesize the information from these results to directly answer the query. \
         If the information is not sufficient to answer the query, please state that clearly."
    ))
}

/// Full query pipeline: embed → retrieve top-K → complete.
///
/// Returns the model's textual completion verbatim.
///
/// # Errors
/// Returns embedding, Qdrant, or completion errors unchanged (no retry,
/// no partial answer).
pub async fn answer_query(
    client: &QdrantFacade,
    provider: &dyn EmbeddingsProvider,
    llm: &LlmServices,
    query: &str,
) -> Result<String, StoreError> {
    let entries = query_context(client, provider, query).await?;
    debug!("Retrieved {} context entries for query", entries.len());

    let prompt = build_prompt(query, &entries)?;
    let answer = llm.answer(&prompt, Some(SYSTEM_PROMPT)).await?;
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prompt_carries_query_and_results() {
        let entries = vec![ContextEntry::from_payload(
            0.91,
            &json!({
                "topic": "Zoom developer platform",
                "start_time": "2024-08-01T10:00:00Z",
                "duration": 45,
                "summary": {"summary_overview": "API walkthrough"}
            }),
        )];
        let prompt = build_prompt("Zoom developer platform", &entries).unwrap();

        assert!(prompt.contains("'Zoom developer platform'"));
        assert!(prompt.contains("API walkthrough"));
        assert!(prompt.contains("\"Score\""));
        assert!(prompt.contains("state that clearly"));
    }

    #[test]
    fn prompt_is_built_for_empty_results() {
        let prompt = build_prompt("anything", &[]).unwrap();
        assert!(prompt.contains("Search Results:\n[]"));
        assert!(prompt.contains("not sufficient"));
    }
}
