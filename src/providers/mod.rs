//! Provider abstractions for embeddings and answer generation
//!
//! Trait seams keep the concrete model backend swappable without touching
//! extraction or session logic.

pub mod embedding;
pub mod llm;
pub mod ollama;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use ollama::OllamaClient;
