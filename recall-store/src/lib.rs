//! High-level facade for meeting-recording recall: ingestion + retrieval
//! over Qdrant.
//!
//! This crate provides a clean API to:
//! - Provision the recordings collection (idempotent)
//! - Ingest recording batch files with on-the-fly embeddings
//! - Retrieve top-K context for a textual query and synthesize an answer
//!
//! The design is flat (no deep nesting) and splits responsibilities into
//! focused modules.

mod config;
mod embed;
mod errors;
mod ingest;
mod point_id;
mod qdrant_facade;
mod record;
mod respond;
mod retrieve;

pub use config::{
    DEFAULT_COLLECTION, DEFAULT_QDRANT_URL, DistanceKind, EMBEDDING_DIM, StoreConfig, VectorSpace,
    recordings_data_dir,
};
pub use embed::{EmbeddingsProvider, ollama::OllamaEmbedder};
pub use errors::StoreError;
pub use ingest::DATA_FILE_SUFFIX;
pub use point_id::point_id_for;
pub use record::{ContextEntry, Recording, RecordingBatch};
pub use respond::{SYSTEM_PROMPT, build_prompt};
pub use retrieve::TOP_K;

use llm_service::LlmServices;
use qdrant_client::qdrant::CollectionInfo;
use std::path::Path;
use tracing::{debug, trace};

/// High-level facade that wires configuration and the Qdrant client.
///
/// This is the single entry point recommended for application code.
pub struct RecallStore {
    cfg: StoreConfig,
    client: qdrant_facade::QdrantFacade,
}

impl RecallStore {
    /// Constructs a new store from the given configuration.
    ///
    /// # Errors
    /// Returns `StoreError::Config` if validation fails and
    /// `StoreError::Qdrant` if the client cannot be built.
    pub fn new(cfg: StoreConfig) -> Result<Self, StoreError> {
        trace!("RecallStore::new collection={}", cfg.collection);
        let client = qdrant_facade::QdrantFacade::new(&cfg)?;
        Ok(Self { cfg, client })
    }

    /// Ensures the recordings collection exists (dim 384, configured
    /// distance). Idempotent; must run before any insert or search.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` if the service is unreachable or
    /// creation fails.
    pub async fn ensure_collection(&self) -> Result<(), StoreError> {
        self.client
            .ensure_collection(&VectorSpace {
                size: EMBEDDING_DIM,
                distance: self.cfg.distance,
            })
            .await
    }

    /// Fetches collection info (point count, status) for diagnostics.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` on client failures.
    pub async fn collection_info(&self) -> Result<Option<CollectionInfo>, StoreError> {
        self.client.collection_info().await
    }

    /// Ingests every batch file from `dir` (see [`DATA_FILE_SUFFIX`]);
    /// per-file failures are logged and skipped.
    ///
    /// # Errors
    /// Returns errors only for run-level failures: unreadable directory or
    /// failed collection provisioning.
    pub async fn ingest_dir(
        &self,
        dir: impl AsRef<Path>,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<u64, StoreError> {
        debug!("RecallStore::ingest_dir dir={:?}", dir.as_ref());
        ingest::ingest_dir(&self.cfg, dir, provider, &self.client).await
    }

    /// Ingests recordings from an explicit batch file path.
    ///
    /// # Errors
    /// Returns errors on I/O, parse, embedding, vector size mismatch, or
    /// Qdrant failures.
    pub async fn ingest_file(
        &self,
        path: impl AsRef<Path>,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<u64, StoreError> {
        trace!("RecallStore::ingest_file path={:?}", path.as_ref());
        ingest::ingest_file(&self.cfg, path, provider, &self.client).await
    }

    /// Performs a low-level vector search and returns `(score, payload)`
    /// tuples.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` if search fails.
    pub async fn search_by_vector(
        &self,
        query_vector: Vec<f32>,
        top_k: u64,
        with_payload: bool,
    ) -> Result<Vec<(f32, serde_json::Value)>, StoreError> {
        trace!("RecallStore::search_by_vector top_k={top_k} with_payload={with_payload}");
        retrieve::search_by_vector(&self.client, query_vector, top_k, with_payload).await
    }

    /// Retrieves the top-K context entries for a textual query using the
    /// provided embedding provider.
    ///
    /// # Errors
    /// Returns embedding errors or Qdrant failures.
    pub async fn query_context(
        &self,
        query: &str,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<Vec<ContextEntry>, StoreError> {
        trace!("RecallStore::query_context");
        retrieve::query_context(&self.client, provider, query).await
    }

    /// Full query pipeline: embed the query, retrieve top-K context, and
    /// synthesize an answer with the LLM service. The completion call is
    /// issued even when the result set is empty.
    ///
    /// # Errors
    /// Returns embedding, Qdrant, or completion errors unchanged.
    pub async fn answer_query(
        &self,
        query: &str,
        provider: &dyn EmbeddingsProvider,
        llm: &LlmServices,
    ) -> Result<String, StoreError> {
        debug!("RecallStore::answer_query");
        respond::answer_query(&self.client, provider, llm, query).await
    }
}
