//! Error types for the chat pipeline

use thiserror::Error;

/// Result type alias for filechat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
///
/// Nothing here is caught or retried: startup failures abort the process
/// before the interactive loop begins, per-turn failures terminate the loop.
#[derive(Debug, Error)]
pub enum Error {
    /// Extension outside the supported set, reported before any file read
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Malformed document content (archive, XML, PDF stream)
    #[error("Failed to parse file '{filename}': {message}")]
    FileParse { filename: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Ollama/LLM error
    #[error("LLM error: {0}")]
    Llm(String),
}

impl Error {
    /// Create a file parse error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }
}
