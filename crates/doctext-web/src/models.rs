use serde::Serialize;

/// Body of a successful `/extract-text` response.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
