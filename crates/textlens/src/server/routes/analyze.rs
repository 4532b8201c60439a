//! Re-analysis endpoint for stored documents

use axum::{extract::State, Json};

use crate::analysis::compute_stats;
use crate::error::Result;
use crate::ingestion::{preview_chunks, truncate_chars};
use crate::server::state::AppState;
use crate::types::{query::AnalyzeRequest, response::AnalyzeResponse};

/// POST /api/analyze - Recompute statistics for a stored document
pub async fn analyze_document(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>> {
    let config = state.config();
    let cap = request.cap.unwrap_or(config.analysis.analyze_cap);
    let preview = request.preview.unwrap_or(config.analysis.default_preview);

    let text = state.store().load_text(&request.doc_id)?;
    let text = truncate_chars(&text, cap);

    let stats = compute_stats(state.segmenter(), text, config.analysis.top_k);
    let preview = preview_chunks(text, preview, config.chunking.preview_chunk_size);

    tracing::info!(
        "Analyzed document {} ({} candidate words)",
        request.doc_id,
        stats.words_est
    );

    Ok(Json(AnalyzeResponse {
        doc_id: request.doc_id,
        stats,
        preview,
    }))
}
