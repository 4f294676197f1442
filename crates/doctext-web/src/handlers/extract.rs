use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};

use doctext_core::Format;

use crate::error::{ApiError, ApiResult};
use crate::models::ExtractResponse;
use crate::state::AppState;
use crate::upload::{self, UploadedFile};

/// `POST /extract-text`: multipart upload in, `{"text": ...}` out.
pub async fn extract_text(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<ExtractResponse>> {
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "request is not a multipart upload");
        ApiError::MissingFile
    })?;
    let upload = upload::parse_multipart(multipart).await?;

    let Some(format) = Format::from_filename(&upload.filename) else {
        tracing::debug!(filename = %upload.filename, "rejecting unsupported file type");
        return Err(ApiError::UnsupportedFormat);
    };

    tracing::debug!(
        filename = %upload.filename,
        %format,
        bytes = upload.data.len(),
        "received upload"
    );

    let filename = upload.filename.clone();
    let result = tokio::task::spawn_blocking(move || run_extraction(&state, &upload, format))
        .await
        .map_err(|e| ApiError::Extraction(format!("extraction task failed: {}", e)))
        .and_then(|r| r);

    match result {
        Ok(text) => {
            tracing::info!(%filename, %format, chars = text.chars().count(), "extracted text");
            Ok(Json(ExtractResponse { text }))
        }
        Err(e) => {
            tracing::warn!(%filename, %format, error = %e, "extraction failed");
            Err(e)
        }
    }
}

/// Stage the upload, run the extractor for `format`, remove the staged file.
fn run_extraction(state: &AppState, upload: &UploadedFile, format: Format) -> ApiResult<String> {
    let staged =
        upload::stage_upload(&state.temp_dir, format, &upload.data).map_err(ApiError::Staging)?;

    let result = state.extractors.extract(staged.path(), format);

    if let Err(e) = staged.close() {
        tracing::warn!(error = %e, "failed to remove staged upload");
    }

    Ok(result?)
}
