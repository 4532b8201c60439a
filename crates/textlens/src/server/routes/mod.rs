//! API routes for the analysis server

pub mod analyze;
pub mod documents;
pub mod search;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Document management
        .route("/documents", get(documents::list_documents))
        .route("/documents/:id", get(documents::get_document))
        .route("/documents/:id", delete(documents::delete_document))
        // Upload - with larger body limit for multipart uploads
        .route(
            "/upload",
            post(upload::upload_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Re-analysis of stored documents
        .route("/analyze", post(analyze::analyze_document))
        // Substring search
        .route("/search", get(search::search_document))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "textlens",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Document ingestion with word-frequency statistics and substring search",
        "endpoints": {
            "POST /api/upload": "Upload a document (multipart: file, filename_hint, cap, preview)",
            "POST /api/analyze": "Re-analyze a stored document",
            "GET /api/search": "Substring search over a document's chunks (doc_id, q, top_k)",
            "GET /api/documents": "List all documents",
            "GET /api/documents/:id": "Get document metadata and text",
            "DELETE /api/documents/:id": "Delete a document"
        },
        "formats": ["txt", "pdf", "docx", "epub", "html"]
    }))
}
