//! Input format detection.

use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// Format of an input file, judged from its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Office Open XML word-processing package
    Docx,
    /// Portable Document Format
    Pdf,
    /// Anything else, read as UTF-8 text
    Text,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Docx => write!(f, "DOCX"),
            InputFormat::Pdf => write!(f, "PDF"),
            InputFormat::Text => write!(f, "Text"),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
/// ZIP local file header magic
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// Main document part every DOCX package carries
pub(crate) const DOCUMENT_PART: &str = "word/document.xml";

/// Detect the format of a file.
///
/// # Example
/// ```no_run
/// use lexclean::detect::{detect_format_from_path, InputFormat};
///
/// let format = detect_format_from_path("policy.pdf").unwrap();
/// assert_eq!(format, InputFormat::Pdf);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = Vec::with_capacity(8);
    reader.by_ref().take(8).read_to_end(&mut header)?;

    if header.starts_with(PDF_MAGIC) {
        return Ok(InputFormat::Pdf);
    }
    if header.starts_with(ZIP_MAGIC) {
        reader.rewind()?;
        return Ok(if has_document_part(reader) {
            InputFormat::Docx
        } else {
            InputFormat::Text
        });
    }
    Ok(InputFormat::Text)
}

/// Detect the format of in-memory data.
pub fn detect_format_from_bytes(data: &[u8]) -> InputFormat {
    if is_pdf_bytes(data) {
        InputFormat::Pdf
    } else if data.starts_with(ZIP_MAGIC) && has_document_part(Cursor::new(data)) {
        InputFormat::Docx
    } else {
        InputFormat::Text
    }
}

fn has_document_part<R: Read + Seek>(reader: R) -> bool {
    match zip::ZipArchive::new(reader) {
        Ok(mut archive) => archive.by_name(DOCUMENT_PART).is_ok(),
        Err(e) => {
            log::warn!("ZIP header present but archive unreadable: {}", e);
            false
        }
    }
}

/// Check if bytes start with the PDF magic.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Check if a file is a DOCX package.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_format_from_path(path), Ok(InputFormat::Docx))
}
