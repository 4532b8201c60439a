//! Per-document directory store
//!
//! Each document lives in `<data_dir>/<doc_id>/` as a direct filesystem
//! mirror with no index on top:
//!
//! ```text
//! text.txt      extracted text (UTF-8)
//! meta.json     DocumentMeta, pretty-printed
//! chunks.jsonl  one StoredChunk JSON object per line
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::ingestion::SlidingChunker;
use crate::types::{DocumentMeta, FileType, StoredChunk};

const TEXT_FILE: &str = "text.txt";
const META_FILE: &str = "meta.json";
const CHUNKS_FILE: &str = "chunks.jsonl";

/// Document store over a flat per-document directory layout
pub struct DocumentStore {
    root: PathBuf,
    chunker: SlidingChunker,
}

impl DocumentStore {
    /// Open (creating if needed) a store rooted at `root`. Persisted chunks
    /// use the given window size and overlap.
    pub fn new(root: impl Into<PathBuf>, chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            chunker: SlidingChunker::new(chunk_size, chunk_overlap),
        })
    }

    /// Store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist a document: text, metadata, and chunked segments.
    /// Returns the new document's metadata.
    pub fn save(
        &self,
        text: &str,
        filename_hint: Option<String>,
        file_type: FileType,
        content_hash: String,
    ) -> Result<DocumentMeta> {
        let doc_id = new_doc_id();
        let dir = self.root.join(&doc_id);
        fs::create_dir_all(&dir)?;

        fs::write(dir.join(TEXT_FILE), text)?;

        let meta = DocumentMeta {
            doc_id,
            filename_hint,
            length: text.chars().count(),
            file_type,
            content_hash,
            created_at: chrono::Utc::now(),
        };
        fs::write(dir.join(META_FILE), serde_json::to_string_pretty(&meta)?)?;

        let lines: Vec<String> = self
            .chunker
            .chunk(text)
            .into_iter()
            .enumerate()
            .map(|(i, text)| serde_json::to_string(&StoredChunk { i: i as u32, text }))
            .collect::<std::result::Result<_, _>>()?;
        fs::write(dir.join(CHUNKS_FILE), lines.join("\n"))?;

        tracing::debug!("Stored document {} ({} chunks)", meta.doc_id, lines.len());
        Ok(meta)
    }

    /// Load a document's metadata
    pub fn load_meta(&self, doc_id: &str) -> Result<DocumentMeta> {
        let dir = self.doc_dir(doc_id)?;
        let content = fs::read_to_string(dir.join(META_FILE))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load a document's stored text
    pub fn load_text(&self, doc_id: &str) -> Result<String> {
        let dir = self.doc_dir(doc_id)?;
        Ok(fs::read_to_string(dir.join(TEXT_FILE))?)
    }

    /// Load a document's persisted chunks
    pub fn load_chunks(&self, doc_id: &str) -> Result<Vec<StoredChunk>> {
        let dir = self.doc_dir(doc_id)?;
        let content = fs::read_to_string(dir.join(CHUNKS_FILE))?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Error::from))
            .collect()
    }

    /// List all stored documents, sorted by document ID. Entries whose
    /// metadata cannot be read are skipped with a warning.
    pub fn list(&self) -> Result<Vec<DocumentMeta>> {
        let mut docs = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let meta_path = entry.path().join(META_FILE);
            match fs::read_to_string(&meta_path) {
                Ok(content) => match serde_json::from_str::<DocumentMeta>(&content) {
                    Ok(meta) => docs.push(meta),
                    Err(e) => {
                        tracing::warn!("Skipping {}: {}", meta_path.display(), e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", meta_path.display(), e);
                }
            }
        }

        docs.sort_by(|a, b| a.doc_id.cmp(&b.doc_id));
        Ok(docs)
    }

    /// Delete a document's directory
    pub fn delete(&self, doc_id: &str) -> Result<()> {
        let dir = self.doc_dir(doc_id)?;
        fs::remove_dir_all(dir)?;
        tracing::info!("Deleted document {}", doc_id);
        Ok(())
    }

    /// Resolve a document directory, rejecting IDs that are not store-issued
    /// (doc IDs are always 12 hex characters, so this also rules out path
    /// traversal) and IDs with no directory.
    fn doc_dir(&self, doc_id: &str) -> Result<PathBuf> {
        let well_formed = doc_id.len() == 12 && doc_id.chars().all(|c| c.is_ascii_hexdigit());
        if !well_formed {
            return Err(Error::DocumentNotFound(doc_id.to_string()));
        }
        let dir = self.root.join(doc_id);
        if !dir.is_dir() {
            return Err(Error::DocumentNotFound(doc_id.to_string()));
        }
        Ok(dir)
    }
}

/// New document ID: first 12 hex characters of a v4 UUID
fn new_doc_id() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> DocumentStore {
        DocumentStore::new(dir.path(), 1200, 100).unwrap()
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let meta = store
            .save(
                "青云门上下三百余口",
                Some("novel.txt".to_string()),
                FileType::Txt,
                "deadbeef".to_string(),
            )
            .unwrap();

        assert_eq!(meta.doc_id.len(), 12);
        assert_eq!(meta.length, 9);

        let loaded = store.load_meta(&meta.doc_id).unwrap();
        assert_eq!(loaded.filename_hint.as_deref(), Some("novel.txt"));
        assert_eq!(store.load_text(&meta.doc_id).unwrap(), "青云门上下三百余口");
    }

    #[test]
    fn chunks_are_written_one_json_object_per_line() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::new(dir.path(), 4, 0).unwrap();

        let meta = store
            .save("abcdefgh", None, FileType::Txt, String::new())
            .unwrap();

        let raw = std::fs::read_to_string(dir.path().join(&meta.doc_id).join("chunks.jsonl")).unwrap();
        assert_eq!(raw, "{\"i\":0,\"text\":\"abcd\"}\n{\"i\":1,\"text\":\"efgh\"}");

        let chunks = store.load_chunks(&meta.doc_id).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].i, 1);
        assert_eq!(chunks[1].text, "efgh");
    }

    #[test]
    fn list_is_sorted_by_doc_id() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        for n in 0..4 {
            store
                .save(&format!("doc {}", n), None, FileType::Txt, String::new())
                .unwrap();
        }

        let docs = store.list().unwrap();
        assert_eq!(docs.len(), 4);
        let ids: Vec<&str> = docs.iter().map(|d| d.doc_id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn list_skips_corrupt_metadata() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.save("ok", None, FileType::Txt, String::new()).unwrap();

        let bad = dir.path().join("abcdef012345");
        std::fs::create_dir_all(&bad).unwrap();
        std::fs::write(bad.join("meta.json"), "{ not json").unwrap();

        let docs = store.list().unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn missing_document_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert!(matches!(
            store.load_meta("0123456789ab"),
            Err(Error::DocumentNotFound(_))
        ));
        assert!(matches!(
            store.delete("0123456789ab"),
            Err(Error::DocumentNotFound(_))
        ));
    }

    #[test]
    fn malformed_ids_are_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert!(matches!(
            store.load_text("../etc/passwd"),
            Err(Error::DocumentNotFound(_))
        ));
        assert!(matches!(
            store.load_text("short"),
            Err(Error::DocumentNotFound(_))
        ));
    }

    #[test]
    fn delete_removes_the_directory() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let meta = store
            .save("to be removed", None, FileType::Txt, String::new())
            .unwrap();
        store.delete(&meta.doc_id).unwrap();

        assert!(!dir.path().join(&meta.doc_id).exists());
        assert!(store.load_meta(&meta.doc_id).is_err());
    }
}
