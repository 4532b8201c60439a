//! Configuration for the analysis service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Analysis configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Load `textlens.toml` from the working directory if present, otherwise defaults
    pub fn load_or_default() -> Self {
        let path = Path::new("textlens.toml");
        if path.exists() {
            match Self::load(path) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", path.display());
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Ignoring {}: {}", path.display(), e);
                }
            }
        }
        Self::default()
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 100MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            max_upload_size: 100 * 1024 * 1024, // 100MB
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for the per-document store
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Window size in characters for persisted chunks
    pub store_chunk_size: usize,
    /// Overlap between persisted chunks in characters
    pub store_chunk_overlap: usize,
    /// Window size in characters for response previews (no overlap)
    pub preview_chunk_size: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            store_chunk_size: 1200,
            store_chunk_overlap: 100,
            preview_chunk_size: 1000,
        }
    }
}

/// Frequency-statistics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of entries kept per statistics table
    pub top_k: usize,
    /// Character cap applied to freshly uploaded text
    pub upload_cap: usize,
    /// Character cap applied when re-analyzing a stored document
    pub analyze_cap: usize,
    /// Default preview length in characters
    pub default_preview: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: 50,
            upload_cap: 100_000,
            analyze_cap: 200_000,
            default_preview: 150,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_constants() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.chunking.store_chunk_size, 1200);
        assert_eq!(config.chunking.store_chunk_overlap, 100);
        assert_eq!(config.analysis.top_k, 50);
        assert_eq!(config.analysis.upload_cap, 100_000);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            enable_cors = false
            max_upload_size = 1048576
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        // Unspecified sections fall back to defaults
        assert_eq!(config.chunking.preview_chunk_size, 1000);
        assert_eq!(config.analysis.analyze_cap, 200_000);
    }
}
