//! Document metadata and stored-chunk types

use serde::{Deserialize, Serialize};

/// Supported file types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Plain text file
    Txt,
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// EPUB ebook
    Epub,
    /// HTML document
    Html,
    /// Unknown file type
    Unknown,
}

impl FileType {
    /// Detect file type from extension. Files without an extension are
    /// treated as plain text.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" | "" => Self::Txt,
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "epub" => Self::Epub,
            "html" | "htm" => Self::Html,
            _ => Self::Unknown,
        }
    }

    /// Check if this is a supported file type
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Txt => "Text File",
            Self::Pdf => "PDF",
            Self::Docx => "Word Document (.docx)",
            Self::Epub => "EPUB eBook",
            Self::Html => "HTML",
            Self::Unknown => "Unknown",
        }
    }
}

/// Metadata persisted as `meta.json` in a document's directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Document ID (12 hex characters)
    pub doc_id: String,
    /// Display name: the caller-supplied hint, or the uploaded filename
    pub filename_hint: Option<String>,
    /// Stored text length in characters
    pub length: usize,
    /// Detected file type of the upload
    pub file_type: FileType,
    /// SHA-256 of the extracted text
    pub content_hash: String,
    /// Ingestion timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// One persisted chunk, serialized as a single line of `chunks.jsonl`.
/// Field names are the on-disk format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredChunk {
    /// Chunk index within the document
    pub i: u32,
    /// Chunk text
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_detection() {
        assert_eq!(FileType::from_extension("pdf"), FileType::Pdf);
        assert_eq!(FileType::from_extension("HTM"), FileType::Html);
        assert_eq!(FileType::from_extension("epub"), FileType::Epub);
        assert_eq!(FileType::from_extension(""), FileType::Txt);
        assert_eq!(FileType::from_extension("xlsx"), FileType::Unknown);
        assert!(!FileType::from_extension("exe").is_supported());
    }

    #[test]
    fn stored_chunk_wire_format() {
        let line = serde_json::to_string(&StoredChunk {
            i: 3,
            text: "第三章".to_string(),
        })
        .unwrap();
        assert_eq!(line, r#"{"i":3,"text":"第三章"}"#);
    }
}
