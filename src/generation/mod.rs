//! Answer generation from retrieved context and conversation history

mod prompt;

pub use prompt::PromptBuilder;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::providers::LlmProvider;
use crate::retrieval::ScoredChunk;
use crate::types::ConversationTurn;

/// Trait for producing an answer from a question, retrieved context, and
/// prior turns. The implementation owns prompt construction and model
/// invocation.
#[async_trait]
pub trait ConversationEngine: Send + Sync {
    async fn answer(
        &self,
        question: &str,
        context: &[ScoredChunk],
        history: &[ConversationTurn],
    ) -> Result<String>;
}

/// LLM-backed conversation engine
pub struct ChatEngine {
    llm: Arc<dyn LlmProvider>,
}

impl ChatEngine {
    /// Create a new engine on top of an LLM provider
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ConversationEngine for ChatEngine {
    async fn answer(
        &self,
        question: &str,
        context: &[ScoredChunk],
        history: &[ConversationTurn],
    ) -> Result<String> {
        let prompt = PromptBuilder::build_chat_prompt(question, context, history);
        tracing::debug!(
            "Generating answer with {} ({} context chunks, {} prior turns)",
            self.llm.model(),
            context.len(),
            history.len()
        );
        self.llm.generate(&prompt).await
    }
}
