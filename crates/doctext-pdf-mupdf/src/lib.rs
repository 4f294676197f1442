use std::fs::File;
use std::io::Read;
use std::path::Path;

use mupdf::{Document, TextPageFlags};

use doctext_core::{ExtractError, TextExtractor};

/// How far into the file the `%PDF-` marker may appear.
const HEADER_SEARCH_WINDOW: u64 = 1024;

/// MuPDF-based implementation of [`TextExtractor`] for `.pdf` files.
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that the HWPX and HWP paths do not transitively
/// depend on it.
///
/// Text is collected line by line from every block on every page; pages are
/// separated by a blank line.
///
/// Files with no `%PDF-` marker in their first kilobyte are rejected before
/// MuPDF sees them, since its repair mode would open them as an empty
/// document. Such files fail with our own `no %PDF- header found` message
/// rather than a library error message. Every other failure carries MuPDF's
/// message unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct MupdfExtractor;

impl MupdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for MupdfExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        if !has_pdf_header(path)? {
            return Err(ExtractError::Pdf(
                "failed to open PDF: no %PDF- header found".to_string(),
            ));
        }

        let path_str = path
            .to_str()
            .ok_or_else(|| ExtractError::Pdf("invalid path encoding".into()))?;

        let document = Document::open(path_str).map_err(|e| ExtractError::Pdf(e.to_string()))?;

        let mut pages_text = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| ExtractError::Pdf(e.to_string()))?
        {
            let page = page_result.map_err(|e| ExtractError::Pdf(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| ExtractError::Pdf(e.to_string()))?;

            let mut page_text = String::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(&line_text);
                    page_text.push('\n');
                }
            }
            pages_text.push(page_text);
        }

        tracing::debug!(pages = pages_text.len(), "extracted PDF text");
        Ok(pages_text.join("\n"))
    }

    fn name(&self) -> &str {
        "mupdf"
    }
}

/// True if `%PDF-` appears within the first [`HEADER_SEARCH_WINDOW`] bytes.
fn has_pdf_header(path: &Path) -> Result<bool, ExtractError> {
    let mut head = Vec::new();
    File::open(path)?
        .take(HEADER_SEARCH_WINDOW)
        .read_to_end(&mut head)?;
    Ok(head.windows(5).any(|w| w == b"%PDF-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_detection() {
        let dir = tempfile::tempdir().unwrap();

        let pdf = dir.path().join("a.pdf");
        std::fs::write(&pdf, b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n").unwrap();
        assert!(has_pdf_header(&pdf).unwrap());

        let junk_prefix = dir.path().join("b.pdf");
        std::fs::write(&junk_prefix, b"\r\n\r\n%PDF-1.4\n").unwrap();
        assert!(has_pdf_header(&junk_prefix).unwrap());

        let text = dir.path().join("c.pdf");
        std::fs::write(&text, b"just some text").unwrap();
        assert!(!has_pdf_header(&text).unwrap());

        let empty = dir.path().join("d.pdf");
        std::fs::write(&empty, b"").unwrap();
        assert!(!has_pdf_header(&empty).unwrap());
    }

    #[test]
    fn test_non_pdf_rejected_before_mupdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        let err = MupdfExtractor.extract_text(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
        assert!(err.to_string().contains("no %PDF- header found"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MupdfExtractor
            .extract_text(&dir.path().join("absent.pdf"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
