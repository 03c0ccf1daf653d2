//! Overlapping text chunker.
//!
//! Splits page text into chunks of at most `chunk_size` characters. Each cut
//! is placed at the latest paragraph break that fits the window, falling back
//! to a sentence end, then a word boundary, and only then a hard character
//! cut. Every chunk after the first on a page starts `chunk_overlap`
//! characters before the end of its predecessor, nudged forward to the next
//! word start.
//!
//! Chunks never span pages, with one exception: a document whose whole text
//! fits in a single chunk is returned as exactly one chunk.

use crate::types::{AppError, Chunk, PageText, Result};

const PAGE_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextChunker {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
        }
    }
}

impl TextChunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(AppError::Config("chunk_size must be greater than 0".into()));
        }
        if chunk_overlap >= chunk_size {
            return Err(AppError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Chunk a single text, attributing every chunk to page 1.
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        self.chunk_pages(&[PageText {
            page: 1,
            text: text.to_string(),
        }])
    }

    /// Chunk a document given as ordered page texts.
    pub fn chunk_pages(&self, pages: &[PageText]) -> Vec<Chunk> {
        let non_empty: Vec<&PageText> = pages.iter().filter(|p| !p.text.trim().is_empty()).collect();
        if non_empty.is_empty() {
            return Vec::new();
        }

        let whole = non_empty
            .iter()
            .map(|p| p.text.trim())
            .collect::<Vec<_>>()
            .join(PAGE_SEPARATOR);
        if whole.chars().count() <= self.chunk_size {
            let first = &non_empty[0].text;
            let start = first.chars().take_while(|c| c.is_whitespace()).count();
            let end = start + first.trim().chars().count();
            return vec![Chunk {
                content: whole,
                chunk_index: 0,
                page: non_empty[0].page,
                start,
                end,
            }];
        }

        let mut chunks = Vec::new();
        for page in non_empty {
            let chars: Vec<char> = page.text.chars().collect();
            for (start, end) in self.split_spans(&chars) {
                let Some((start, end)) = trim_span(&chars, start, end) else {
                    continue;
                };
                chunks.push(Chunk {
                    content: chars[start..end].iter().collect(),
                    chunk_index: chunks.len(),
                    page: page.page,
                    start,
                    end,
                });
            }
        }

        chunks
    }

    /// Compute raw `[start, end)` character spans covering `chars`.
    fn split_spans(&self, chars: &[char]) -> Vec<(usize, usize)> {
        let len = chars.len();
        let mut spans = Vec::new();
        let mut start = 0;

        loop {
            if len - start <= self.chunk_size {
                spans.push((start, len));
                break;
            }

            let end = self.find_break(chars, start);
            spans.push((start, end));

            let mut next = snap_to_word_start(chars, end - self.chunk_overlap, end);
            if next <= start {
                next = end;
            }
            start = next;
        }

        spans
    }

    /// Pick the cut position for the window starting at `start`.
    ///
    /// Candidates must leave more than `chunk_overlap` characters in the
    /// chunk so the next window always advances.
    fn find_break(&self, chars: &[char], start: usize) -> usize {
        let limit = start + self.chunk_size;
        let min = start + self.chunk_overlap + 1;

        let levels: [fn(&[char], usize) -> bool; 3] =
            [is_paragraph_break, is_sentence_break, is_word_break];

        for is_break in levels {
            if let Some(pos) = (min..=limit).rev().find(|&pos| is_break(chars, pos)) {
                return pos;
            }
        }

        limit
    }
}

/// Position right after a blank line.
fn is_paragraph_break(chars: &[char], pos: usize) -> bool {
    pos >= 2 && chars[pos - 1] == '\n' && chars[pos - 2] == '\n'
}

/// Position right after sentence-ending punctuation and its whitespace.
fn is_sentence_break(chars: &[char], pos: usize) -> bool {
    pos >= 2 && chars[pos - 1].is_whitespace() && matches!(chars[pos - 2], '.' | '!' | '?')
}

fn is_word_break(chars: &[char], pos: usize) -> bool {
    pos >= 1 && chars[pos - 1].is_whitespace()
}

/// First word start in `[from, until]`, or `from` if there is none.
fn snap_to_word_start(chars: &[char], from: usize, until: usize) -> usize {
    (from..=until)
        .find(|&i| (i == 0 || chars[i - 1].is_whitespace()) && !chars[i].is_whitespace())
        .unwrap_or(from)
}

fn trim_span(chars: &[char], mut start: usize, mut end: usize) -> Option<(usize, usize)> {
    while start < end && chars[start].is_whitespace() {
        start += 1;
    }
    while end > start && chars[end - 1].is_whitespace() {
        end -= 1;
    }
    (start < end).then_some((start, end))
}
