//! Prompt templates for grounded conversation

use crate::retrieval::ScoredChunk;
use crate::types::ConversationTurn;

/// Prompt builder for document-grounded chat
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the context block from retrieved chunks
    pub fn build_context(context: &[ScoredChunk]) -> String {
        context
            .iter()
            .map(|c| c.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Format prior turns as Q/A pairs, oldest first
    pub fn build_history(history: &[ConversationTurn]) -> String {
        history
            .iter()
            .map(|turn| format!("Q: {}\nA: {}", turn.question, turn.answer))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Build the full chat prompt from context, history, and question
    pub fn build_chat_prompt(
        question: &str,
        context: &[ScoredChunk],
        history: &[ConversationTurn],
    ) -> String {
        let history_block = if history.is_empty() {
            String::new()
        } else {
            format!(
                "\nPrevious conversation:\n{}\n",
                Self::build_history(history)
            )
        };

        format!(
            r#"Based on the following context, answer the question. Only use information from the context.

Context:
{context}
{history_block}
Question: {question}

Answer:"#,
            context = Self::build_context(context),
            history_block = history_block,
            question = question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chunk;

    fn scored(content: &str, index: u32) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk::new(content.to_string(), index),
            similarity: 0.9,
        }
    }

    #[test]
    fn test_prompt_contains_context_and_question() {
        let context = vec![scored("alpha facts", 0), scored("beta facts", 1)];
        let prompt = PromptBuilder::build_chat_prompt("what is alpha?", &context, &[]);

        assert!(prompt.contains("alpha facts"));
        assert!(prompt.contains("beta facts"));
        assert!(prompt.contains("Question: what is alpha?"));
        assert!(!prompt.contains("Previous conversation:"));
    }

    #[test]
    fn test_history_rendered_as_qa_pairs() {
        let history = vec![
            ConversationTurn {
                question: "first?".to_string(),
                answer: "one".to_string(),
            },
            ConversationTurn {
                question: "second?".to_string(),
                answer: "two".to_string(),
            },
        ];
        let prompt = PromptBuilder::build_chat_prompt("third?", &[scored("ctx", 0)], &history);

        assert!(prompt.contains("Previous conversation:"));
        let first = prompt.find("Q: first?\nA: one").unwrap();
        let second = prompt.find("Q: second?\nA: two").unwrap();
        assert!(first < second);
    }
}
