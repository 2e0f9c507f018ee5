//! PDF text extraction using lopdf.
//!
//! Used for uploaded documents and reference policies; layout is not
//! reconstructed, each page's text is taken as lopdf reports it.

use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::error::{Error, Result};

/// PDF text extractor.
pub struct PdfText {
    doc: LopdfDocument,
}

impl PdfText {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Self::checked(doc)
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Self::checked(doc)
    }

    fn checked(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Extract text from all pages, one page after another.
    ///
    /// Pages whose text cannot be decoded are skipped with a warning.
    pub fn extract(&self) -> String {
        let mut pages = Vec::new();
        for page_num in self.doc.get_pages().keys() {
            match self.doc.extract_text(&[*page_num]) {
                Ok(text) => pages.push(text),
                Err(e) => log::warn!("Page {}: text extraction failed: {}", page_num, e),
            }
        }
        pages.join("\n")
    }
}
