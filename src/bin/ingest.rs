//! Ingestor: embeds and upserts every recording batch file from the
//! configured data directory.
//!
//! Takes no CLI arguments; the directory comes from `RECORDINGS_DATA_DIR`
//! (default `data`). Per-file failures are logged and skipped.

use std::sync::Arc;

use llm_service::LlmServices;
use llm_service::config::default_config::config_ollama_embedding;
use recall_store::{EMBEDDING_DIM, OllamaEmbedder, RecallStore, StoreConfig, recordings_data_dir};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file when present.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // No answer profile: ingestion only embeds.
    let llm = Arc::new(LlmServices::new(None, config_ollama_embedding()?)?);
    let provider = OllamaEmbedder::new(llm, EMBEDDING_DIM);

    let store = RecallStore::new(StoreConfig::from_env()?)?;
    let dir = recordings_data_dir();

    let total = store.ingest_dir(&dir, &provider).await?;
    tracing::info!(total, dir = %dir.display(), "Data insertion complete");

    Ok(())
}
