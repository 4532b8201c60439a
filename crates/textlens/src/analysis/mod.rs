//! Lexical analysis: dictionary-based segmentation and frequency statistics

mod segmenter;
mod stats;

pub use segmenter::Segmenter;
pub use stats::{compute_stats, KeywordEntry, NameCount, TextStats};
