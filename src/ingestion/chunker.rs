//! Fixed-size sliding-window text chunking

use crate::types::Chunk;

/// Text chunker with configurable size and overlap
pub struct TextChunker {
    /// Maximum chunk size in characters
    chunk_size: usize,
    /// Overlap between consecutive chunks
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker. The overlap must be smaller than the chunk size
    /// so each window advances.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        assert!(
            overlap < chunk_size,
            "chunk overlap must be smaller than chunk size"
        );
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Split `text` into chunks of at most `chunk_size` characters, each
    /// sharing `overlap` characters with its predecessor, in reading order.
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        let mut chunks = Vec::new();
        let mut start = 0usize;

        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            let content: String = chars[start..end].iter().collect();
            chunks.push(Chunk::new(content, chunks.len() as u32));

            if end == chars.len() {
                break;
            }
            start = end - self.overlap;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        let chunker = TextChunker::new(500, 50);
        let chunks = chunker.split("hello world");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "hello world");
        assert_eq!(chunks[0].index, 0);
    }

    #[test]
    fn test_empty_text_no_chunks() {
        let chunker = TextChunker::new(500, 50);
        assert!(chunker.split("").is_empty());
    }

    #[test]
    fn test_windows_respect_size_and_overlap() {
        let text: String = std::iter::repeat('a')
            .take(450)
            .chain(std::iter::repeat('b').take(450))
            .chain(std::iter::repeat('c').take(300))
            .collect();
        let chunker = TextChunker::new(500, 50);
        let chunks = chunker.split(&text);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].content.chars().count(), 500);
        assert_eq!(chunks[1].content.chars().count(), 500);
        assert_eq!(chunks[2].content.chars().count(), 300);

        // each chunk starts with the last `overlap` characters of its predecessor
        let tail0: String = chunks[0].content.chars().skip(450).collect();
        let head1: String = chunks[1].content.chars().take(50).collect();
        assert_eq!(tail0, head1);

        let indexes: Vec<u32> = chunks.iter().map(|c| c.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn test_split_is_idempotent() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);
        let chunker = TextChunker::new(120, 20);

        let first: Vec<String> = chunker.split(&text).into_iter().map(|c| c.content).collect();
        let second: Vec<String> = chunker.split(&text).into_iter().map(|c| c.content).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let text = "héllo wörld ünïcode".repeat(60);
        let chunker = TextChunker::new(100, 10);
        let chunks = chunker.split(&text);
        assert!(chunks.iter().all(|c| c.content.chars().count() <= 100));
        assert!(!chunks.is_empty());
    }
}
