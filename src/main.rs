//! Command-line entry point
//!
//! Extracts the document, builds the index, then hands control to the
//! interactive session. Startup failures abort before the first prompt.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filechat::config::ChatConfig;
use filechat::generation::ChatEngine;
use filechat::ingestion::{TextChunker, TextExtractor};
use filechat::providers::OllamaClient;
use filechat::retrieval::Retriever;
use filechat::session::ChatSession;

#[derive(Debug, Parser)]
#[command(
    name = "filechat",
    about = "Conversational Q&A over the contents of a local file"
)]
struct Args {
    /// Path to the source document
    #[arg(short, long, default_value = "./data.pdf")]
    path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "filechat=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = ChatConfig::default();

    tracing::info!("Embedding model: {}", config.llm.embed_model);
    tracing::info!("Generation model: {}", config.llm.generate_model);

    let text = TextExtractor::extract(&args.path)?;
    let chunker = TextChunker::new(config.chunking.chunk_size, config.chunking.chunk_overlap);
    let chunks = chunker.split(&text);
    tracing::info!(
        "Split {} characters into {} chunks",
        text.chars().count(),
        chunks.len()
    );

    let client = Arc::new(OllamaClient::new(&config.llm));
    let retriever = Retriever::build(client.clone(), chunks, config.retrieval.top_k).await?;
    let engine = ChatEngine::new(client);

    println!("Active data repository: {}", args.path.display());

    let mut session = ChatSession::new(&retriever, &engine);
    session
        .run(std::io::stdin().lock(), std::io::stdout())
        .await?;

    Ok(())
}
