//! Query Responder: answers a natural-language question about the stored
//! recordings.
//!
//! Takes the query text as its sole positional argument and prints the
//! synthesized answer. With no argument it prints `No query provided.`
//! and takes no action.

use std::sync::Arc;

use llm_service::LlmServices;
use llm_service::config::default_config::{config_anthropic_answer, config_ollama_embedding};
use recall_store::{EMBEDDING_DIM, OllamaEmbedder, RecallStore, StoreConfig};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file when present.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let Some(query) = std::env::args().nth(1) else {
        println!("No query provided.");
        return Ok(());
    };

    // The missing-credential check happens here, before any network call.
    let llm = Arc::new(LlmServices::new(
        Some(config_anthropic_answer()?),
        config_ollama_embedding()?,
    )?);
    let provider = OllamaEmbedder::new(llm.clone(), EMBEDDING_DIM);

    let store = RecallStore::new(StoreConfig::from_env()?)?;

    let answer = store.answer_query(&query, &provider, &llm).await?;
    println!("Answer: {answer}");

    Ok(())
}
