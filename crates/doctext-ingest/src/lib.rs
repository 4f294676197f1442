use std::path::Path;

use thiserror::Error;

use doctext_hwpx::HwpxExtractor;

pub mod hwp;

// Re-export domain types for convenience
pub use doctext_core::{ExtractError, Format, TextExtractor};
pub use hwp::{HWP_PLACEHOLDER, HwpPlaceholder};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Static mapping from each [`Format`] to the extractor that handles it.
pub struct Extractors {
    pdf: Box<dyn TextExtractor>,
    hwpx: Box<dyn TextExtractor>,
    hwp: Box<dyn TextExtractor>,
}

impl Extractors {
    pub fn new(
        pdf: Box<dyn TextExtractor>,
        hwpx: Box<dyn TextExtractor>,
        hwp: Box<dyn TextExtractor>,
    ) -> Self {
        Self { pdf, hwpx, hwp }
    }

    pub fn for_format(&self, format: Format) -> &dyn TextExtractor {
        match format {
            Format::Pdf => self.pdf.as_ref(),
            Format::Hwpx => self.hwpx.as_ref(),
            Format::Hwp => self.hwp.as_ref(),
        }
    }

    /// Run the extractor registered for `format` on the file at `path`.
    pub fn extract(&self, path: &Path, format: Format) -> Result<String, ExtractError> {
        let extractor = self.for_format(format);
        tracing::debug!(%format, extractor = extractor.name(), path = %path.display(), "dispatching");
        extractor.extract_text(path)
    }
}

impl Default for Extractors {
    /// MuPDF for PDF (when the `pdf` feature is on), HWPX walker, HWP placeholder.
    fn default() -> Self {
        Self::new(default_pdf(), Box::new(HwpxExtractor), Box::new(HwpPlaceholder))
    }
}

/// Extract text from a PDF, HWPX or HWP file using the default extractors.
///
/// The format is taken from the file name's extension, case-insensitively.
pub fn extract_text(path: &Path) -> Result<String, IngestError> {
    let format = Format::from_path(path)
        .ok_or_else(|| IngestError::UnsupportedFormat(path.display().to_string()))?;
    Ok(Extractors::default().extract(path, format)?)
}

#[cfg(feature = "pdf")]
fn default_pdf() -> Box<dyn TextExtractor> {
    Box::new(doctext_pdf_mupdf::MupdfExtractor::new())
}

#[cfg(not(feature = "pdf"))]
fn default_pdf() -> Box<dyn TextExtractor> {
    Box::new(NoPdfSupport)
}

#[cfg(not(feature = "pdf"))]
struct NoPdfSupport;

#[cfg(not(feature = "pdf"))]
impl TextExtractor for NoPdfSupport {
    fn extract_text(&self, _path: &Path) -> Result<String, ExtractError> {
        Err(ExtractError::PdfUnavailable)
    }

    fn name(&self) -> &str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_format_routes_each_tag() {
        let extractors = Extractors::default();
        assert_eq!(extractors.for_format(Format::Hwpx).name(), "hwpx");
        assert_eq!(extractors.for_format(Format::Hwp).name(), "hwp-placeholder");
        #[cfg(feature = "pdf")]
        assert_eq!(extractors.for_format(Format::Pdf).name(), "mupdf");
        #[cfg(not(feature = "pdf"))]
        assert_eq!(extractors.for_format(Format::Pdf).name(), "none");
    }

    #[test]
    fn test_extract_text_hwp_any_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("계획서.HwP");
        std::fs::write(&path, b"\xd0\xcf\x11\xe0 binary compound file").unwrap();

        assert_eq!(extract_text(&path).unwrap(), HWP_PLACEHOLDER);
    }

    #[test]
    fn test_extract_text_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let err = extract_text(&path).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_extract_text_corrupt_hwpx() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.hwpx");
        std::fs::write(&path, b"not a zip").unwrap();

        let err = extract_text(&path).unwrap_err();
        assert!(matches!(
            err,
            IngestError::Extract(ExtractError::Archive(_))
        ));
    }

    #[cfg(not(feature = "pdf"))]
    #[test]
    fn test_pdf_unavailable_without_feature() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.pdf");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let err = extract_text(&path).unwrap_err();
        assert!(matches!(
            err,
            IngestError::Extract(ExtractError::PdfUnavailable)
        ));
    }
}
