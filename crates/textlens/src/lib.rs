//! textlens: local document ingestion and lexical-analysis service
//!
//! Accepts uploaded documents (plain text, PDF, DOCX, EPUB, HTML), extracts
//! raw text, persists it in a flat per-document directory store with chunked
//! segments, and exposes word-frequency statistics and naive substring search
//! over the stored documents through a small HTTP API.

pub mod analysis;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod retrieval;
pub mod server;
pub mod storage;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::{
    document::{DocumentMeta, FileType, StoredChunk},
    response::{AnalyzeResponse, ChunkHit, SearchResponse, UploadResponse},
};
