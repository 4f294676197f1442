//! Plain-text extraction from HWPX documents.
//!
//! An HWPX file is a zip container; body text lives in
//! `Contents/section<N>.xml`. Only the first section is read.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use thiserror::Error;
use zip::result::ZipError;

use doctext_core::{ExtractError, TextExtractor};

pub mod section;

pub use section::{SECTION_NS, section_paragraphs};

/// Archive entry holding the first body section.
pub const SECTION_ENTRY: &str = "Contents/section0.xml";

/// Largest uncompressed section part we are willing to inflate.
pub const MAX_SECTION_SIZE: u64 = 256 * 1024 * 1024; // 256MB

#[derive(Error, Debug)]
pub enum HwpxError {
    #[error("not a valid HWPX archive: {0}")]
    Archive(#[from] ZipError),
    #[error("There is no item named '{0}' in the archive")]
    MissingSection(&'static str),
    #[error("{entry} is {size} bytes uncompressed, over the {limit} byte limit")]
    SectionTooLarge {
        entry: &'static str,
        size: u64,
        limit: u64,
    },
    #[error("malformed section XML: {0}")]
    MalformedXml(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<HwpxError> for ExtractError {
    fn from(err: HwpxError) -> Self {
        match err {
            HwpxError::Io(e) => ExtractError::Io(e),
            HwpxError::MalformedXml(_) => ExtractError::MalformedXml(err.to_string()),
            HwpxError::Archive(_)
            | HwpxError::MissingSection(_)
            | HwpxError::SectionTooLarge { .. } => ExtractError::Archive(err.to_string()),
        }
    }
}

/// [`TextExtractor`] for `.hwpx` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct HwpxExtractor;

impl TextExtractor for HwpxExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        Ok(extract_text(path)?)
    }

    fn name(&self) -> &str {
        "hwpx"
    }
}

/// Extract the text of an HWPX file: one line per paragraph of the first section.
pub fn extract_text(path: &Path) -> Result<String, HwpxError> {
    let file = File::open(path)?;
    extract_text_from_reader(BufReader::new(file))
}

/// Like [`extract_text`], over any seekable reader holding the archive bytes.
pub fn extract_text_from_reader<R: Read + Seek>(reader: R) -> Result<String, HwpxError> {
    let xml = read_section(reader)?;
    let paragraphs = section_paragraphs(&xml)?;
    tracing::debug!(
        paragraphs = paragraphs.len(),
        xml_bytes = xml.len(),
        "extracted HWPX section"
    );
    Ok(paragraphs.join("\n"))
}

fn read_section<R: Read + Seek>(reader: R) -> Result<Vec<u8>, HwpxError> {
    let mut archive = zip::ZipArchive::new(reader)?;

    let entry = match archive.by_name(SECTION_ENTRY) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Err(HwpxError::MissingSection(SECTION_ENTRY)),
        Err(e) => return Err(e.into()),
    };

    if entry.size() > MAX_SECTION_SIZE {
        return Err(HwpxError::SectionTooLarge {
            entry: SECTION_ENTRY,
            size: entry.size(),
            limit: MAX_SECTION_SIZE,
        });
    }

    let mut xml = Vec::with_capacity(entry.size() as usize);
    // The declared size can lie; cap what we actually inflate as well
    entry
        .take(MAX_SECTION_SIZE + 1)
        .read_to_end(&mut xml)
        .map_err(ZipError::from)?;
    if xml.len() as u64 > MAX_SECTION_SIZE {
        return Err(HwpxError::SectionTooLarge {
            entry: SECTION_ENTRY,
            size: xml.len() as u64,
            limit: MAX_SECTION_SIZE,
        });
    }

    Ok(xml)
}
