//! End-to-end ingestion pipeline: read batch files → derive ids and
//! embeddable text → resolve vectors → upsert into Qdrant.
//!
//! Each `*.txt` file in the data directory is one batch with zero or more
//! recordings. Files are independent: a file that fails to parse, embed or
//! upsert is logged and skipped, and the run continues with the next one.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use qdrant_client::Payload;
use qdrant_client::qdrant::PointStruct;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::config::{EMBEDDING_DIM, StoreConfig, VectorSpace};
use crate::embed::EmbeddingsProvider;
use crate::errors::StoreError;
use crate::point_id::point_id_for;
use crate::qdrant_facade::QdrantFacade;
use crate::record::{Recording, RecordingBatch};

/// Suffix of batch files produced by the recorder.
pub const DATA_FILE_SUFFIX: &str = ".txt";

/// Ingests every batch file under `dir` (matching [`DATA_FILE_SUFFIX`]).
///
/// Per-file failures are logged and skipped; the total number of upserted
/// points across the surviving files is returned.
///
/// # Errors
/// Returns `StoreError::Io` if the directory itself cannot be read, and
/// `StoreError::Qdrant` if collection provisioning fails (both abort the
/// run before any file-level work).
pub async fn ingest_dir(
    cfg: &StoreConfig,
    dir: impl AsRef<Path>,
    provider: &dyn EmbeddingsProvider,
    client: &QdrantFacade,
) -> Result<u64, StoreError> {
    let dir = dir.as_ref();
    info!("Ingesting batch files from {:?}", dir);

    let files = batch_files(dir)?;
    if files.is_empty() {
        warn!("No {} files found in {:?}", DATA_FILE_SUFFIX, dir);
        return Ok(0);
    }

    // Provision once up front; per-file runs then only upsert.
    client
        .ensure_collection(&VectorSpace {
            size: EMBEDDING_DIM,
            distance: cfg.distance,
        })
        .await?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
        )
        .unwrap()
        .progress_chars("##-"),
    );

    let mut total: u64 = 0;
    for path in &files {
        match ingest_file(cfg, path, provider, client).await {
            Ok(n) => total += n,
            Err(e) => {
                error!("Skipping batch file {:?}: {e}", path);
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Ingestion complete");
    info!("Ingested {} points from {} files", total, files.len());
    Ok(total)
}

/// Ingests recordings from one batch file.
///
/// The collection must already exist (see [`ingest_dir`] or call
/// `ensure_collection` first).
///
/// # Errors
/// Returns errors on I/O, parse, embedding, vector size mismatch, or
/// Qdrant failures.
pub async fn ingest_file(
    cfg: &StoreConfig,
    path: impl AsRef<Path>,
    provider: &dyn EmbeddingsProvider,
    client: &QdrantFacade,
) -> Result<u64, StoreError> {
    let path = path.as_ref();
    info!("Processing file {:?}", path);

    let raw = std::fs::read_to_string(path)?;
    let batch: RecordingBatch = serde_json::from_str(&raw)?;

    if batch.recordings.is_empty() {
        debug!("No recordings found in {:?}", path);
        return Ok(0);
    }

    let mut total: u64 = 0;
    let batch_size = cfg.upsert_batch.max(1);
    for chunk in batch.recordings.chunks(batch_size) {
        let points = build_points(chunk, EMBEDDING_DIM, provider).await?;
        total += client.upsert_points(points).await?;
    }

    info!("Ingested {} points from {:?}", total, path);
    Ok(total)
}

/// Builds Qdrant points for a batch of recordings.
///
/// One point per recording: id derived from the uuid token, vector from
/// the embeddable text, payload carrying topic/start_time/duration and the
/// summary object (or `{}`).
pub(crate) async fn build_points(
    chunk: &[Recording],
    vector_size: usize,
    provider: &dyn EmbeddingsProvider,
) -> Result<Vec<PointStruct>, StoreError> {
    let mut pts = Vec::with_capacity(chunk.len());

    for r in chunk {
        let text = r.embedding_text();
        let vector = provider.embed(&text).await?;
        if vector.len() != vector_size {
            return Err(StoreError::VectorSizeMismatch {
                got: vector.len(),
                want: vector_size,
            });
        }

        let id = point_id_for(&r.uuid);

        info!(
            id = %id,
            topic = %r.topic,
            text = %text,
            vector_prefix = ?&vector[..vector.len().min(5)],
            "Prepared point"
        );

        let payload: Payload = json!({
            "topic": r.topic,
            "start_time": r.start_time,
            "duration": r.duration,
            "summary": r.payload_summary(),
        })
        .try_into()
        .map_err(|e| StoreError::Qdrant(format!("payload convert: {e}")))?;

        pts.push(PointStruct::new(id, vector, payload));
    }

    Ok(pts)
}

/// Lists batch files under `dir`, sorted by name for a stable run order.
fn batch_files(dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_batch = path.is_file()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(DATA_FILE_SUFFIX));
        if is_batch {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::{future::Future, pin::Pin};

    /// Deterministic provider: a constant vector of the configured length.
    struct StubEmbedder {
        dim: usize,
    }

    impl EmbeddingsProvider for StubEmbedder {
        fn embed<'a>(
            &'a self,
            _text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>> {
            Box::pin(async move { Ok(vec![0.25; self.dim]) })
        }
    }

    fn sample_recording() -> Recording {
        serde_json::from_value(json!({
            "uuid": "MDEyMzQ1Njc4OWFiY2RlZg==",
            "topic": "Zoom developer platform",
            "start_time": "2024-08-01T10:00:00Z",
            "duration": 45,
            "summary": {"summary_overview": "API walkthrough"}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn build_points_derives_stable_ids() {
        let provider = StubEmbedder { dim: 8 };
        let points = build_points(&[sample_recording()], 8, &provider)
            .await
            .unwrap();
        assert_eq!(points.len(), 1);

        let again = build_points(&[sample_recording()], 8, &provider)
            .await
            .unwrap();
        // Same decodable uuid → same point id → upsert overwrites.
        assert_eq!(points[0].id, again[0].id);
    }

    #[tokio::test]
    async fn build_points_rejects_wrong_dimension() {
        let provider = StubEmbedder { dim: 3 };
        let err = build_points(&[sample_recording()], 8, &provider)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::VectorSizeMismatch { got: 3, want: 8 }
        ));
    }

    #[test]
    fn batch_files_filters_and_sorts() {
        let dir = std::env::temp_dir().join(format!("recall-batch-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("b.txt"), "{}").unwrap();
        std::fs::write(dir.join("a.txt"), "{}").unwrap();
        std::fs::write(dir.join("notes.json"), "{}").unwrap();

        let files = batch_files(&dir).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
