//! Document ingestion: multi-format parsing and text chunking

mod chunker;
mod parser;

pub use chunker::{preview_chunks, truncate_chars, SlidingChunker};
pub use parser::{FileParser, ParsedDocument};
