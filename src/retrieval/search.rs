//! In-memory vector index and query-time retrieval

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::providers::EmbeddingProvider;
use crate::types::Chunk;

/// A chunk scored against a query
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Similarity score (0.0-1.0, higher is better)
    pub similarity: f32,
}

/// Retrieval seam consumed by the session loop
#[async_trait]
pub trait ChunkRetriever: Send + Sync {
    /// Return the chunks most relevant to `query`, best first
    async fn search(&self, query: &str) -> Result<Vec<ScoredChunk>>;
}

struct IndexEntry {
    chunk: Chunk,
    embedding: Vec<f32>,
}

/// In-memory cosine-similarity index over embedded chunks
#[derive(Default)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a chunk with its embedding
    pub fn insert(&mut self, chunk: Chunk, embedding: Vec<f32>) {
        self.entries.push(IndexEntry { chunk, embedding });
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank every entry against `query_embedding` and return the top `k`
    pub fn search(&self, query_embedding: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut results: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                similarity: cosine_similarity(query_embedding, &entry.embedding),
            })
            .collect();

        results.sort_by(|a, b| b.similarity.partial_cmp(&a.similarity).unwrap());
        results.truncate(k);
        results
    }
}

/// Embeds queries and searches the index built from a document's chunks
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: VectorIndex,
    top_k: usize,
}

impl Retriever {
    /// Embed every chunk sequentially and build the index.
    /// Any embedding failure aborts construction.
    pub async fn build(
        embedder: Arc<dyn EmbeddingProvider>,
        chunks: Vec<Chunk>,
        top_k: usize,
    ) -> Result<Self> {
        let mut index = VectorIndex::new();

        for chunk in chunks {
            let embedding = embedder.embed(&chunk.content).await?;
            index.insert(chunk, embedding);
        }

        tracing::info!("Indexed {} chunks with {}", index.len(), embedder.name());

        Ok(Self {
            embedder,
            index,
            top_k,
        })
    }
}

#[async_trait]
impl ChunkRetriever for Retriever {
    async fn search(&self, query: &str) -> Result<Vec<ScoredChunk>> {
        let query_embedding = self.embedder.embed(query).await?;
        Ok(self.index.search(&query_embedding, self.top_k))
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
