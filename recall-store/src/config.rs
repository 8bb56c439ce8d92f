//! Runtime and collection configuration.

use std::path::PathBuf;

use crate::errors::StoreError;

/// Dimensionality of the embedding space shared by ingest and query.
pub const EMBEDDING_DIM: usize = 384;

/// Default collection name for recording summaries.
pub const DEFAULT_COLLECTION: &str = "user_recordings";

/// Default Qdrant gRPC endpoint.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Default directory holding recording batch files.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Distance function used for the vector space.
#[derive(Clone, Copy, Debug)]
pub enum DistanceKind {
    /// Cosine distance (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    Dot,
    /// Euclidean distance (L2).
    Euclid,
}

/// Describes the vector space of the collection.
#[derive(Clone, Debug)]
pub struct VectorSpace {
    /// Dimensionality of vectors.
    pub size: usize,
    /// Distance function.
    pub distance: DistanceKind,
}

/// Configuration for ingestion and retrieval.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Distance function (Cosine by default).
    pub distance: DistanceKind,
    /// Upsert batch size.
    pub upsert_batch: usize,
}

impl StoreConfig {
    /// Creates a sane default config for a given collection name and
    /// Qdrant endpoint.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            distance: DistanceKind::Cosine,
            upsert_batch: 256,
        }
    }

    /// Builds a config from environment variables.
    ///
    /// - `QDRANT_URL`             (default `http://localhost:6334`)
    /// - `QDRANT_API_KEY`         (optional)
    /// - `RECORDINGS_COLLECTION`  (default `user_recordings`)
    ///
    /// # Errors
    /// Returns `StoreError::Config` if the resulting config fails
    /// validation.
    pub fn from_env() -> Result<Self, StoreError> {
        let url = env_nonempty("QDRANT_URL").unwrap_or_else(|| DEFAULT_QDRANT_URL.to_string());
        let collection =
            env_nonempty("RECORDINGS_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

        let cfg = Self {
            qdrant_url: url,
            qdrant_api_key: env_nonempty("QDRANT_API_KEY"),
            collection,
            distance: DistanceKind::Cosine,
            upsert_batch: 256,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(StoreError::Config("qdrant_url is empty".into()));
        }
        if !(self.qdrant_url.starts_with("http://") || self.qdrant_url.starts_with("https://")) {
            return Err(StoreError::Config(
                "qdrant_url must start with http:// or https://".into(),
            ));
        }
        if self.collection.trim().is_empty() {
            return Err(StoreError::Config("collection is empty".into()));
        }
        if self.upsert_batch == 0 {
            return Err(StoreError::Config("upsert_batch must be > 0".into()));
        }
        Ok(())
    }
}

/// Directory holding recording batch files, from `RECORDINGS_DATA_DIR`
/// (default `data`). The ingestion binary takes no CLI arguments; the
/// directory is fixed in configuration.
pub fn recordings_data_dir() -> PathBuf {
    PathBuf::from(env_nonempty("RECORDINGS_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.into()))
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = StoreConfig::new_default(DEFAULT_QDRANT_URL, DEFAULT_COLLECTION);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_collection_is_rejected() {
        let cfg = StoreConfig::new_default(DEFAULT_QDRANT_URL, "");
        assert!(matches!(cfg.validate(), Err(StoreError::Config(_))));
    }

    #[test]
    fn schemeless_url_is_rejected() {
        let cfg = StoreConfig::new_default("localhost:6334", DEFAULT_COLLECTION);
        assert!(matches!(cfg.validate(), Err(StoreError::Config(_))));
    }

    #[test]
    fn zero_batch_is_rejected() {
        let mut cfg = StoreConfig::new_default(DEFAULT_QDRANT_URL, DEFAULT_COLLECTION);
        cfg.upsert_batch = 0;
        assert!(matches!(cfg.validate(), Err(StoreError::Config(_))));
    }
}
