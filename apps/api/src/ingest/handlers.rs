//! Axum route handler for CV uploads.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::ingest::pipeline::{process_batch, IngestItem};
use crate::ingest::IngestResponse;
use crate::state::AppState;

/// POST /api/v1/cv/upload
///
/// Accepts one or more files in a multipart payload and returns one outcome
/// per file. Per-item extraction failures land in the outcome list; only a
/// malformed payload fails the request itself.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<IngestResponse>, AppError> {
    let mut items = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart payload: {e}")))?
    {
        let filename = field
            .file_name()
            .map(str::to_string)
            .or_else(|| field.name().map(str::to_string))
            .unwrap_or_else(|| "upload".to_string());

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("could not read '{filename}': {e}")))?;

        items.push(IngestItem { filename, bytes });
    }

    if items.is_empty() {
        return Err(AppError::Validation(
            "upload contained no files".to_string(),
        ));
    }

    let response = process_batch(
        state.store.as_ref(),
        state.extractor.as_ref(),
        state.config.max_upload_bytes,
        items,
    )
    .await;

    Ok(Json(response))
}
