//! Document management endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::response::{DeleteResponse, DocumentListResponse, DocumentResponse};

/// GET /api/documents - List all stored documents
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<DocumentListResponse>> {
    let docs = state.store().list()?;
    Ok(Json(DocumentListResponse { docs }))
}

/// GET /api/documents/:id - Get a document's metadata and stored text
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentResponse>> {
    let meta = state.store().load_meta(&id)?;
    let text = state.store().load_text(&id)?;
    Ok(Json(DocumentResponse { meta, text }))
}

/// DELETE /api/documents/:id - Delete a document
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.store().delete(&id)?;
    Ok(Json(DeleteResponse {
        doc_id: id,
        message: "Document removed.".to_string(),
    }))
}
