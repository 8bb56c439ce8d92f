//! Collection Provisioner: ensures the recordings collection exists.
//!
//! Idempotent; safe to run before every ingestion or query. Prints the
//! collection status afterwards.

use recall_store::{RecallStore, StoreConfig};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file when present.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cfg = StoreConfig::from_env()?;
    let collection = cfg.collection.clone();
    let store = RecallStore::new(cfg)?;

    store.ensure_collection().await?;

    if let Some(info) = store.collection_info().await? {
        tracing::info!(
            collection = %collection,
            points = ?info.points_count,
            status = info.status,
            "Collection ready"
        );
    }

    Ok(())
}
