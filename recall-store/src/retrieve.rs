//! Retrieval helpers: low-level vector search and query-context projection.

use crate::embed::EmbeddingsProvider;
use crate::errors::StoreError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::ContextEntry;

use tracing::trace;

/// Number of nearest points retrieved for a query.
pub const TOP_K: u64 = 5;

/// Performs a low-level similarity search given a ready query vector.
///
/// # Errors
/// Returns `StoreError::Qdrant` on client failures.
pub async fn search_by_vector(
    client: &QdrantFacade,
    query_vector: Vec<f32>,
    top_k: u64,
    with_payload: bool,
) -> Result<Vec<(f32, serde_json::Value)>, StoreError> {
    trace!("retrieve::search_by_vector top_k={top_k} with_payload={with_payload}");
    client.search(query_vector, top_k, with_payload).await
}

/// Embeds the query text and returns the top-K hits projected into
/// [`ContextEntry`] values (missing payload fields become `"N/A"`).
///
/// The provider must be the same one used at ingestion time, so that the
/// two paths share one embedding space.
///
/// # Errors
/// Returns embedding/provider errors or Qdrant failures.
pub async fn query_context(
    client: &QdrantFacade,
    provider: &dyn EmbeddingsProvider,
    query: &str,
) -> Result<Vec<ContextEntry>, StoreError> {
    trace!("retrieve::query_context top_k={TOP_K}");

    let qv = provider.embed(query).await?;
    let hits = search_by_vector(client, qv, TOP_K, true).await?;

    let out = hits
        .iter()
        .map(|(score, payload)| ContextEntry::from_payload(*score, payload))
        .collect();

    Ok(out)
}
