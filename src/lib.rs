//! filechat: conversational question-answering over a single local document.
//!
//! Extracts the text of a file (plain text, Markdown, JSON, PDF, Word,
//! OpenDocument, or source code), splits it into overlapping chunks, embeds
//! the chunks into an in-memory vector index through a local Ollama endpoint,
//! and answers questions about the document in an interactive loop that
//! carries the conversation history from turn to turn.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod session;
pub mod types;

pub use config::ChatConfig;
pub use error::{Error, Result};
pub use types::{Chunk, ConversationTurn, FileType};
