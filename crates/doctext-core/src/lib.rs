use std::fmt;
use std::path::Path;

use thiserror::Error;

pub mod config_file;
pub mod extractor;

pub use extractor::TextExtractor;

/// Document formats the service knows how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Pdf,
    Hwpx,
    Hwp,
}

impl Format {
    /// Every supported format, in the order suffixes are matched.
    pub const ALL: [Format; 3] = [Format::Pdf, Format::Hwpx, Format::Hwp];

    /// Detect the format from a filename by case-insensitive suffix match.
    ///
    /// Returns `None` for anything that does not end in `.pdf`, `.hwpx` or `.hwp`.
    pub fn from_filename(filename: &str) -> Option<Format> {
        let lower = filename.to_lowercase();
        Format::ALL
            .into_iter()
            .find(|format| lower.ends_with(format.extension()))
    }

    /// Same as [`Format::from_filename`], using the final path component.
    pub fn from_path(path: &Path) -> Option<Format> {
        path.file_name()
            .map(|n| n.to_string_lossy())
            .and_then(|n| Format::from_filename(&n))
    }

    /// The filename suffix for this format, including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Pdf => ".pdf",
            Format::Hwpx => ".hwpx",
            Format::Hwp => ".hwp",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Pdf => "pdf",
            Format::Hwpx => "hwpx",
            Format::Hwp => "hwp",
        };
        f.write_str(name)
    }
}

/// Failure raised by a [`TextExtractor`].
///
/// Messages are surfaced to HTTP callers verbatim, so variants carry the
/// underlying library message rather than a summary.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{0}")]
    Archive(String),
    #[error("{0}")]
    MalformedXml(String),
    #[error("{0}")]
    Pdf(String),
    #[error("PDF support not compiled in (enable the `pdf` feature of doctext-ingest)")]
    PdfUnavailable,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_filename_known_suffixes() {
        assert_eq!(Format::from_filename("report.pdf"), Some(Format::Pdf));
        assert_eq!(Format::from_filename("plan.hwpx"), Some(Format::Hwpx));
        assert_eq!(Format::from_filename("plan.hwp"), Some(Format::Hwp));
    }

    #[test]
    fn test_from_filename_is_case_insensitive() {
        assert_eq!(Format::from_filename("REPORT.PDF"), Some(Format::Pdf));
        assert_eq!(Format::from_filename("Plan.HwPx"), Some(Format::Hwpx));
        assert_eq!(Format::from_filename("운영계획.HWP"), Some(Format::Hwp));
    }

    #[test]
    fn test_from_filename_rejects_unknown() {
        assert_eq!(Format::from_filename("notes.docx"), None);
        assert_eq!(Format::from_filename("archive.hwpx.zip"), None);
        assert_eq!(Format::from_filename("pdf"), None);
        assert_eq!(Format::from_filename(""), None);
    }

    #[test]
    fn test_from_path_uses_file_name() {
        assert_eq!(
            Format::from_path(Path::new("/tmp/some.pdf.dir/file.hwpx")),
            Some(Format::Hwpx)
        );
        assert_eq!(Format::from_path(Path::new("/tmp/file.pdf/")), Some(Format::Pdf));
    }

    #[test]
    fn test_display() {
        assert_eq!(Format::Hwpx.to_string(), "hwpx");
    }
}
