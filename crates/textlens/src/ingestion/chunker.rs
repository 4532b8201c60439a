//! Fixed-size sliding-window text chunking
//!
//! Chunk windows are measured in characters, never bytes, so multi-byte
//! (CJK) text is never split inside a scalar value.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Sliding-window chunker with configurable size and overlap
pub struct SlidingChunker {
    /// Window size in characters
    size: usize,
    /// Overlap between consecutive windows
    overlap: usize,
}

impl SlidingChunker {
    /// Create a new chunker. A zero window size is clamped to 1.
    pub fn new(size: usize, overlap: usize) -> Self {
        Self {
            size: size.max(1),
            overlap,
        }
    }

    /// Split text into windows, collapsing whitespace runs first.
    ///
    /// The step between windows is `size - overlap`, clamped to at least 1
    /// so an overlap of `size` or more cannot stall. The final window may be
    /// shorter than `size`.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let collapsed = WHITESPACE.replace_all(text, " ");
        let chars: Vec<char> = collapsed.chars().collect();
        let n = chars.len();
        if n == 0 {
            return Vec::new();
        }

        let step = self.size.saturating_sub(self.overlap).max(1);
        let mut out = Vec::new();
        let mut start = 0usize;
        while start < n {
            let end = (start + self.size).min(n);
            out.push(chars[start..end].iter().collect());
            start += step;
        }
        out
    }
}

/// Leading preview windows of a text: non-overlapping `chunk_size` windows,
/// enough of them to cover `preview_chars` (at least one).
pub fn preview_chunks(text: &str, preview_chars: usize, chunk_size: usize) -> Vec<String> {
    let chunk_size = chunk_size.max(1);
    let take = (preview_chars / chunk_size).max(1);
    SlidingChunker::new(chunk_size, 0)
        .chunk(text)
        .into_iter()
        .take(take)
        .collect()
}

/// Truncate a string to at most `cap` characters, on a character boundary.
pub fn truncate_chars(text: &str, cap: usize) -> &str {
    match text.char_indices().nth(cap) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_before_windowing() {
        let chunker = SlidingChunker::new(100, 0);
        let chunks = chunker.chunk("a  b\t\tc\n\nd");
        assert_eq!(chunks, vec!["a b c d".to_string()]);
    }

    #[test]
    fn windows_overlap_by_configured_amount() {
        let chunker = SlidingChunker::new(4, 2);
        let chunks = chunker.chunk("abcdefgh");
        // step = 2: abcd, cdef, efgh, gh
        assert_eq!(chunks, vec!["abcd", "cdef", "efgh", "gh"]);
    }

    #[test]
    fn windows_count_characters_not_bytes() {
        let chunker = SlidingChunker::new(3, 0);
        let chunks = chunker.chunk("青云门弟子张小凡");
        assert_eq!(chunks, vec!["青云门", "弟子张", "小凡"]);
    }

    #[test]
    fn oversized_overlap_still_advances() {
        let chunker = SlidingChunker::new(2, 5);
        let chunks = chunker.chunk("abcd");
        // step clamps to 1
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0], "ab");
        assert_eq!(chunks[3], "d");
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        let chunker = SlidingChunker::new(1000, 100);
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn preview_covers_requested_length() {
        let text = "x".repeat(3500);
        let chunks = preview_chunks(&text, 2000, 1000);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 1000);
    }

    #[test]
    fn preview_always_returns_at_least_one_chunk() {
        let chunks = preview_chunks("short text", 150, 1000);
        assert_eq!(chunks, vec!["short text".to_string()]);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("修炼太极玄清道", 2), "修炼");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
