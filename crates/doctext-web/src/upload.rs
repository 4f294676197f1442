use std::io::Write;
use std::path::Path;

use axum::body::Bytes;
use axum::extract::Multipart;
use tempfile::NamedTempFile;

use doctext_core::Format;

use crate::error::ApiError;

/// Name of the multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

/// An uploaded file with its data and metadata.
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

/// Pull the `file` attachment out of a multipart form.
///
/// Only a field that carries a filename counts as an attachment; plain text
/// fields named `file` are ignored like any other field. When several file
/// fields are sent the first one wins.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadedFile, ApiError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await? {
        let is_attachment = field.name() == Some(FILE_FIELD) && field.file_name().is_some();

        if is_attachment && file.is_none() {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await?;
            file = Some(UploadedFile { filename, data });
        } else {
            // Drain ignored fields so the stream can advance
            let _ = field.bytes().await?;
        }
    }

    file.ok_or(ApiError::MissingFile)
}

/// Write an upload to a uniquely named file in `dir`.
///
/// The returned guard deletes the file when dropped, so every exit path of
/// the caller (early return, error, panic unwinding) removes it.
pub fn stage_upload(dir: &Path, format: Format, data: &[u8]) -> std::io::Result<NamedTempFile> {
    let mut staged = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(format.extension())
        .tempfile_in(dir)?;
    staged.write_all(data)?;
    staged.flush()?;
    Ok(staged)
}
