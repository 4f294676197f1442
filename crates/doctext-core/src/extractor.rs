use std::path::Path;

use crate::ExtractError;

/// A format-specific text extractor.
///
/// Implementors take a path to a file already on disk and return its plain
/// text. Extraction is blocking; async callers run it on a blocking thread.
pub trait TextExtractor: Send + Sync {
    /// Extract the full text content of the file at `path`.
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}
