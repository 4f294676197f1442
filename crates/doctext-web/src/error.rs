//! Error handling for the extraction endpoint.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use doctext_core::ExtractError;

use crate::models::ErrorResponse;

/// Everything the endpoint can answer with besides extracted text.
///
/// The `Display` text is what callers see in the `error` field.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("파일이 없습니다.")]
    MissingFile,
    #[error("지원하지 않는 파일 형식입니다.")]
    UnsupportedFormat,
    #[error("{}", .0.body_text())]
    BadUpload(#[from] MultipartError),
    #[error("{0}")]
    Extraction(String),
    #[error("failed to stage upload: {0}")]
    Staging(#[source] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFile | ApiError::UnsupportedFormat => StatusCode::BAD_REQUEST,
            ApiError::BadUpload(e) => e.status(),
            ApiError::Extraction(_) | ApiError::Staging(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        ApiError::Extraction(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingFile.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::UnsupportedFormat.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Extraction("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Staging(std::io::Error::other("disk full")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_extract_error_message_passes_through() {
        let err: ApiError = ExtractError::Pdf("failed to open PDF: bad xref".into()).into();
        assert_eq!(err.to_string(), "failed to open PDF: bad xref");
    }
}
