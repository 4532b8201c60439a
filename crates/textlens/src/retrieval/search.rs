//! Linear substring scoring over a document's chunks

use crate::ingestion::truncate_chars;
use crate::types::{ChunkHit, StoredChunk};

/// Snippet length returned with each hit, in characters
const SNIPPET_CHARS: usize = 300;

/// Score chunks by the number of non-overlapping occurrences of `query`,
/// keep the matching ones sorted by score descending (ties in chunk order),
/// and return at most `top_k` hits.
pub fn search_chunks(chunks: &[StoredChunk], query: &str, top_k: usize) -> Vec<ChunkHit> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<ChunkHit> = chunks
        .iter()
        .filter_map(|chunk| {
            let score = chunk.text.matches(query).count();
            if score > 0 {
                Some(ChunkHit {
                    i: chunk.i,
                    score,
                    text: truncate_chars(&chunk.text, SNIPPET_CHARS).to_string(),
                })
            } else {
                None
            }
        })
        .collect();

    // Stable sort keeps ties in chunk order
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(top_k);
    hits
}
