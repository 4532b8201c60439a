//! Substring search endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::Result;
use crate::retrieval::search_chunks;
use crate::server::state::AppState;
use crate::types::{query::SearchParams, response::SearchResponse};

/// GET /api/search?doc_id=..&q=..&top_k=.. - Substring search over a
/// document's stored chunks
pub async fn search_document(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let chunks = state.store().load_chunks(&params.doc_id)?;
    let hits = search_chunks(&chunks, &params.q, params.top_k);

    tracing::info!(
        "Search \"{}\" in {}: {} hits",
        params.q,
        params.doc_id,
        hits.len()
    );

    Ok(Json(SearchResponse {
        doc_id: params.doc_id,
        query: params.q,
        hits,
    }))
}
