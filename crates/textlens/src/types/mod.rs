//! Core types for the analysis service

pub mod document;
pub mod query;
pub mod response;

pub use document::{DocumentMeta, FileType, StoredChunk};
pub use query::AnalyzeRequest;
pub use response::{
    AnalyzeResponse, ChunkHit, DeleteResponse, DocumentListResponse, DocumentResponse,
    SearchResponse, UploadResponse,
};
