//! Handlers for CSV bulk upload and the duplicates re-export.
//!
//! The upload is spooled into a named temporary file inside the configured
//! upload directory. The handler owns that file for the whole request, so it
//! is removed on every exit path, including errors and panics.

use std::io::BufReader;
use std::path::Path;

use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Json;
use clubdir_core::club::ClubFields;
use clubdir_core::ingest::{decode_rows, render_rows_csv, run_ingestion, IngestionOutcome};
use serde::Serialize;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "csv";

#[derive(Debug, Serialize)]
pub struct BulkUploadResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub outcome: IngestionOutcome,
}

/// POST /bulk-upload
///
/// Responds 200 with counts even when rows were skipped. Only an
/// undecodable file or a store failure fails the request.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<BulkUploadResponse>> {
    let spooled = spool_upload(&state.config.upload_dir, &mut multipart)
        .await?
        .ok_or_else(|| AppError::BadRequest("No CSV file uploaded".into()))?;

    let reader = spooled
        .reopen()
        .map_err(|e| AppError::InternalError(format!("Failed to reopen upload: {e}")))?;
    let rows = tokio::task::spawn_blocking(move || decode_rows(BufReader::new(reader)))
        .await
        .map_err(|e| AppError::InternalError(format!("CSV decode task failed: {e}")))??;

    let outcome = run_ingestion(state.store.as_ref(), rows).await?;

    Ok(Json(BulkUploadResponse {
        message: "Bulk upload complete",
        outcome,
    }))
}

/// POST /bulk-upload/duplicates.csv
///
/// Renders rows (normally the `duplicates` of an upload response) back into
/// the upload schema so they can be corrected and re-submitted.
pub async fn duplicates_csv(Json(rows): Json<Vec<ClubFields>>) -> AppResult<impl IntoResponse> {
    let body = render_rows_csv(&rows)?;
    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (CONTENT_DISPOSITION, "attachment; filename=\"duplicates.csv\""),
        ],
        body,
    ))
}

/// Stream the [`UPLOAD_FIELD`] part into a temp file in `dir`.
///
/// Returns `None` when the request carries no such part. Other parts are
/// ignored.
async fn spool_upload(dir: &Path, multipart: &mut Multipart) -> AppResult<Option<NamedTempFile>> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
        let spooled = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(".csv")
            .tempfile_in(dir)
            .map_err(|e| AppError::InternalError(format!("Failed to create temp file: {e}")))?;

        let handle = spooled
            .as_file()
            .try_clone()
            .map_err(|e| AppError::InternalError(format!("Failed to open temp file: {e}")))?;
        let mut writer = tokio::fs::File::from_std(handle);

        let mut bytes = 0usize;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            bytes += chunk.len();
            writer
                .write_all(&chunk)
                .await
                .map_err(|e| AppError::InternalError(format!("Failed to write upload: {e}")))?;
        }
        writer
            .flush()
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to write upload: {e}")))?;

        tracing::debug!(
            path = %spooled.path().display(),
            file_name = ?field.file_name(),
            bytes,
            "Upload spooled"
        );
        return Ok(Some(spooled));
    }

    Ok(None)
}
