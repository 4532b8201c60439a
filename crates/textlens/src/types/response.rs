//! Response types

use serde::{Deserialize, Serialize};

use crate::analysis::TextStats;
use crate::types::document::DocumentMeta;

/// Response for a document upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// ID of the newly stored document
    pub doc_id: String,
    /// Display name (hint or uploaded filename)
    pub filename: Option<String>,
    /// Leading text windows of the stored content
    pub preview: Vec<String>,
    /// Frequency statistics over the stored content
    pub stats: TextStats,
}

/// Response for re-analysis of a stored document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub doc_id: String,
    pub stats: TextStats,
    pub preview: Vec<String>,
}

/// One search hit over a document's chunks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkHit {
    /// Chunk index within the document
    pub i: u32,
    /// Number of occurrences of the query in the chunk
    pub score: usize,
    /// Leading 300 characters of the chunk
    pub text: String,
}

/// Response for substring search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub doc_id: String,
    pub query: String,
    pub hits: Vec<ChunkHit>,
}

/// Response for the document listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub docs: Vec<DocumentMeta>,
}

/// Response for a single document fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub meta: DocumentMeta,
    pub text: String,
}

/// Response for a document deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub doc_id: String,
    pub message: String,
}
