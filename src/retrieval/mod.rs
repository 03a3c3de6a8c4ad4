//! Chunk embedding, in-memory indexing, and similarity search

mod search;

pub use search::{ChunkRetriever, Retriever, ScoredChunk, VectorIndex};
