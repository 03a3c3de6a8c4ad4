//! LLM provider trait for generating answers

use async_trait::async_trait;

use crate::error::Result;

/// Trait for LLM-based text generation
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model being used
    fn model(&self) -> &str;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
