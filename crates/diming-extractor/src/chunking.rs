//! Text chunking strategies for long documents
//!
//! Sizes are counted in characters, not bytes, so CJK text is never cut
//! inside a code point.

use crate::config::ChunkStrategy;

const SENTENCE_ENDINGS: &[char] = &['。', '！', '？', '；', '.', '!', '?', '\n'];

/// Chunks text according to the specified strategy
pub struct TextChunker {
    strategy: ChunkStrategy,
    max_chunk_size: usize,
}

impl TextChunker {
    /// Create a new text chunker
    ///
    /// A `max_chunk_size` of zero is treated as one.
    pub fn new(strategy: ChunkStrategy, max_chunk_size: usize) -> Self {
        Self {
            strategy,
            max_chunk_size: max_chunk_size.max(1),
        }
    }

    /// Chunk the given text
    ///
    /// Text that already fits comes back unchanged as a single chunk, and so
    /// does text with nothing left after blank lines are dropped. The result
    /// is never empty.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if char_len(text) <= self.max_chunk_size {
            return vec![text.to_string()];
        }

        let chunks = match self.strategy {
            ChunkStrategy::ByParagraph => self.chunk_by_paragraph(text),
            ChunkStrategy::BySection => self.chunk_by_section(text),
            ChunkStrategy::BySentence => self.chunk_by_sentence(text),
        };

        if chunks.is_empty() {
            return vec![text.to_string()];
        }
        chunks
    }

    /// Chunk by paragraphs (non-blank lines)
    fn chunk_by_paragraph(&self, text: &str) -> Vec<String> {
        let paragraphs: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        self.combine_until_limit(&paragraphs, "\n")
    }

    /// Chunk by sections (markdown headers, numbered sections, or 第…章/回)
    fn chunk_by_section(&self, text: &str) -> Vec<String> {
        let mut sections = Vec::new();
        let mut current_section = String::new();

        for line in text.lines() {
            if is_section_header(line) && !current_section.trim().is_empty() {
                sections.push(current_section.trim().to_string());
                current_section.clear();
            }

            current_section.push_str(line);
            current_section.push('\n');
        }

        if !current_section.trim().is_empty() {
            sections.push(current_section.trim().to_string());
        }

        if sections.len() <= 1 {
            // Fall back to paragraph chunking
            return self.chunk_by_paragraph(text);
        }
        self.combine_until_limit(&sections, "\n\n")
    }

    /// Chunk after sentence-ending punctuation
    fn chunk_by_sentence(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for (idx, c) in text.char_indices() {
            if SENTENCE_ENDINGS.contains(&c) {
                let end = idx + c.len_utf8();
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = end;
            }
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail);
        }

        self.combine_until_limit(&sentences, "")
    }

    /// Combine elements until they reach the size limit
    fn combine_until_limit<S: AsRef<str>>(&self, elements: &[S], separator: &str) -> Vec<String> {
        let separator_len = char_len(separator);
        let mut chunks = Vec::new();
        let mut current_chunk = String::new();
        let mut current_len = 0;

        for element in elements {
            let element_str = element.as_ref();
            let element_len = char_len(element_str);
            let joined_len = if current_chunk.is_empty() {
                element_len
            } else {
                current_len + separator_len + element_len
            };

            if joined_len > self.max_chunk_size {
                if !current_chunk.is_empty() {
                    chunks.push(std::mem::take(&mut current_chunk));
                    current_len = 0;
                }

                // If single element exceeds limit, split it
                if element_len > self.max_chunk_size {
                    chunks.extend(split_at_char_limit(element_str, self.max_chunk_size));
                    continue;
                }
            }

            if !current_chunk.is_empty() {
                current_chunk.push_str(separator);
                current_len += separator_len;
            }
            current_chunk.push_str(element_str);
            current_len += element_len;
        }

        if !current_chunk.is_empty() {
            chunks.push(current_chunk);
        }

        chunks
    }
}

fn is_section_header(line: &str) -> bool {
    let line = line.trim_start();
    if line.starts_with('#') {
        return true;
    }
    if line.starts_with('第') && line.chars().take(12).any(|c| matches!(c, '章' | '回' | '节')) {
        return true;
    }
    line.chars().next().is_some_and(|c| c.is_ascii_digit()) && line.contains('.')
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split text into pieces of at most `limit` characters
fn split_at_char_limit(text: &str, limit: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(limit)
        .map(|piece| piece.iter().collect())
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn strategy() -> impl Strategy<Value = ChunkStrategy> {
        prop_oneof![
            Just(ChunkStrategy::ByParagraph),
            Just(ChunkStrategy::BySection),
            Just(ChunkStrategy::BySentence),
        ]
    }

    proptest! {
        /// Property: no chunk exceeds the limit
        #[test]
        fn test_chunks_respect_limit(
            text in "[东海龙宫天庭。！\\n#第回a-z ]{0,200}",
            limit in 1usize..50,
            strategy in strategy(),
        ) {
            prop_assume!(!text.trim().is_empty());
            let chunker = TextChunker::new(strategy, limit);
            for chunk in chunker.chunk(&text) {
                prop_assert!(char_len(&chunk) <= limit);
            }
        }

        /// Property: chunking always yields at least one chunk
        #[test]
        fn test_chunks_never_empty(
            text in "[东海。\\n ]{0,100}",
            limit in 1usize..20,
            strategy in strategy(),
        ) {
            let chunker = TextChunker::new(strategy, limit);
            prop_assert!(!chunker.chunk(&text).is_empty());
        }
    }
}
