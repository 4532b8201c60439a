//! Request types

use serde::{Deserialize, Serialize};

/// Request body for re-analyzing a stored document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Document to analyze
    pub doc_id: String,

    /// Character cap applied before analysis (default: config `analyze_cap`)
    #[serde(default)]
    pub cap: Option<usize>,

    /// Preview length in characters (default: config `default_preview`)
    #[serde(default)]
    pub preview: Option<usize>,
}

/// Query parameters for substring search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Document to search in
    pub doc_id: String,
    /// Literal substring to look for
    pub q: String,
    /// Maximum number of hits to return
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    10
}
