//! Interactive question-answering session
//!
//! A two-state loop: awaiting input until the exit command (or end of
//! input), terminated afterwards. History is append-only for the lifetime
//! of the session and is never persisted.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::generation::ConversationEngine;
use crate::retrieval::ChunkRetriever;
use crate::types::ConversationTurn;

/// Input that ends the session
pub const EXIT_COMMAND: &str = "/quit";

const PROMPT: &str = "Ask me anything! (Type /quit to exit) >>> ";
const ANSWER_PREFIX: &str = ">>> ";
const FAREWELL: &str = "Bye.";

/// One interactive session over an indexed document
pub struct ChatSession<'a> {
    retriever: &'a dyn ChunkRetriever,
    engine: &'a dyn ConversationEngine,
    history: Vec<ConversationTurn>,
}

impl<'a> ChatSession<'a> {
    /// Create a session with empty history
    pub fn new(retriever: &'a dyn ChunkRetriever, engine: &'a dyn ConversationEngine) -> Self {
        Self {
            retriever,
            engine,
            history: Vec::new(),
        }
    }

    /// The accumulated turns, in input order
    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    /// Answer a single question: retrieve context, invoke the engine with
    /// the prior turns, then append the new turn to history.
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        let context = self.retriever.search(question).await?;
        let answer = self
            .engine
            .answer(question, &context, &self.history)
            .await?;

        self.history.push(ConversationTurn {
            question: question.to_string(),
            answer: answer.clone(),
        });

        Ok(answer)
    }

    /// Run the read-answer-print loop until the exit command or end of
    /// input. Every non-exit line, including the empty string, is answered;
    /// any retrieval or generation failure propagates and ends the loop.
    pub async fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            let query = line.strip_suffix('\n').unwrap_or(&line);
            let query = query.strip_suffix('\r').unwrap_or(query);

            if query == EXIT_COMMAND {
                writeln!(output, "{FAREWELL}")?;
                break;
            }

            let answer = self.ask(query).await?;
            writeln!(output, "{ANSWER_PREFIX}{answer}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::retrieval::ScoredChunk;
    use crate::types::Chunk;

    struct StubRetriever;

    #[async_trait]
    impl ChunkRetriever for StubRetriever {
        async fn search(&self, _query: &str) -> Result<Vec<ScoredChunk>> {
            Ok(vec![ScoredChunk {
                chunk: Chunk::new("context".to_string(), 0),
                similarity: 1.0,
            }])
        }
    }

    /// Records, per call, the question asked and the history seen at call time
    struct RecordingEngine {
        calls: Mutex<Vec<(String, Vec<ConversationTurn>)>>,
    }

    impl RecordingEngine {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ConversationEngine for RecordingEngine {
        async fn answer(
            &self,
            question: &str,
            _context: &[ScoredChunk],
            history: &[ConversationTurn],
        ) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((question.to_string(), history.to_vec()));
            Ok(format!("answer to {question}"))
        }
    }

    #[tokio::test]
    async fn test_quit_after_one_question() {
        let retriever = StubRetriever;
        let engine = RecordingEngine::new();
        let mut session = ChatSession::new(&retriever, &engine);

        let input = std::io::Cursor::new(b"what is X?\n/quit\n".to_vec());
        let mut output = Vec::new();
        session.run(input, &mut output).await.unwrap();

        let calls = engine.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "what is X?");
        assert_eq!(session.history().len(), 1);

        let printed = String::from_utf8(output).unwrap();
        // prompted once for the question and once for the exit command, then stopped
        assert_eq!(printed.matches(PROMPT).count(), 2);
        assert!(printed.contains(">>> answer to what is X?"));
        assert!(printed.ends_with("Bye.\n"));
    }

    #[tokio::test]
    async fn test_quit_immediately_makes_no_engine_call() {
        let retriever = StubRetriever;
        let engine = RecordingEngine::new();
        let mut session = ChatSession::new(&retriever, &engine);

        let input = std::io::Cursor::new(b"/quit\n".to_vec());
        let mut output = Vec::new();
        session.run(input, &mut output).await.unwrap();

        assert!(engine.calls.lock().unwrap().is_empty());
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_history_accumulates_in_order() {
        let retriever = StubRetriever;
        let engine = RecordingEngine::new();
        let mut session = ChatSession::new(&retriever, &engine);

        let input = std::io::Cursor::new(b"one?\ntwo?\nthree?\n/quit\n".to_vec());
        let mut output = Vec::new();
        session.run(input, &mut output).await.unwrap();

        assert_eq!(session.history().len(), 3);
        let questions: Vec<&str> = session
            .history()
            .iter()
            .map(|t| t.question.as_str())
            .collect();
        assert_eq!(questions, vec!["one?", "two?", "three?"]);

        // call K sees exactly the first K-1 turns
        let calls = engine.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        for (k, (_, seen)) in calls.iter().enumerate() {
            assert_eq!(seen.len(), k);
            assert_eq!(&seen[..], &session.history()[..k]);
        }
    }

    #[tokio::test]
    async fn test_empty_input_still_calls_engine() {
        let retriever = StubRetriever;
        let engine = RecordingEngine::new();
        let mut session = ChatSession::new(&retriever, &engine);

        let input = std::io::Cursor::new(b"\n/quit\n".to_vec());
        let mut output = Vec::new();
        session.run(input, &mut output).await.unwrap();

        let calls = engine.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "");
    }

    #[tokio::test]
    async fn test_end_of_input_terminates_loop() {
        let retriever = StubRetriever;
        let engine = RecordingEngine::new();
        let mut session = ChatSession::new(&retriever, &engine);

        let input = std::io::Cursor::new(b"last question\n".to_vec());
        let mut output = Vec::new();
        session.run(input, &mut output).await.unwrap();

        assert_eq!(engine.calls.lock().unwrap().len(), 1);
        assert_eq!(session.history().len(), 1);
    }
}
