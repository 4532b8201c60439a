//! Document upload endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::time::Instant;

use crate::analysis::compute_stats;
use crate::error::{Error, Result};
use crate::ingestion::{preview_chunks, truncate_chars, FileParser};
use crate::server::state::AppState;
use crate::types::response::UploadResponse;

/// POST /api/upload - Upload and analyze one document
///
/// Multipart fields: `file` (required), `filename_hint`, `cap`, `preview`.
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let start = Instant::now();

    let mut file_name: Option<String> = None;
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename_hint: Option<String> = None;
    let mut cap: Option<usize> = None;
    let mut preview: Option<usize> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        Error::Internal(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                file_name = field.file_name().map(|s| s.to_string());
                let data = field.bytes().await.map_err(|e| {
                    Error::Internal(format!("Failed to read file: {}", e))
                })?;
                file_data = Some(data.to_vec());
            }
            "filename_hint" => {
                filename_hint = field.text().await.ok().filter(|s| !s.is_empty());
            }
            "cap" => {
                cap = field.text().await.ok().and_then(|s| s.trim().parse().ok());
            }
            "preview" => {
                preview = field.text().await.ok().and_then(|s| s.trim().parse().ok());
            }
            _ => {}
        }
    }

    let data = file_data
        .ok_or_else(|| Error::InvalidRequest("multipart field 'file' is required".to_string()))?;

    // The uploaded filename drives format detection, falling back to the
    // hint; with neither, the payload is treated as plain text
    let parse_name = file_name
        .clone()
        .or_else(|| filename_hint.clone())
        .unwrap_or_else(|| "upload.txt".to_string());

    let config = state.config();
    let cap = cap.unwrap_or(config.analysis.upload_cap);
    let preview = preview.unwrap_or(config.analysis.default_preview);

    tracing::info!("Processing upload: {} ({} bytes)", parse_name, data.len());

    let parsed = FileParser::parse(&parse_name, &data)?;
    let text = truncate_chars(&parsed.content, cap);

    let display_name = filename_hint.or(file_name);
    let meta = state.store().save(
        text,
        display_name.clone(),
        parsed.file_type,
        parsed.content_hash,
    )?;

    let stats = compute_stats(state.segmenter(), text, config.analysis.top_k);
    let preview = preview_chunks(text, preview, config.chunking.preview_chunk_size);

    tracing::info!(
        "Ingested document {} ({} chars) in {:.1}s",
        meta.doc_id,
        meta.length,
        start.elapsed().as_secs_f64()
    );

    Ok(Json(UploadResponse {
        doc_id: meta.doc_id,
        filename: display_name,
        preview,
        stats,
    }))
}
