//! Extraction through MuPDF on a checked-in two-page document.

use std::path::PathBuf;

use doctext_core::TextExtractor;
use doctext_pdf_mupdf::MupdfExtractor;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_extracts_every_page_in_order() {
    let text = MupdfExtractor::new()
        .extract_text(&fixture("two_pages.pdf"))
        .unwrap();

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    assert_eq!(lines, vec!["Hello, world!", "Second page"]);
}

#[test]
fn test_pages_separated_by_blank_line() {
    let text = MupdfExtractor::new()
        .extract_text(&fixture("two_pages.pdf"))
        .unwrap();

    let hello = text.find("Hello, world!").unwrap();
    let second = text.find("Second page").unwrap();
    assert!(hello < second);
    assert!(text[hello..second].contains("\n\n"));
}

