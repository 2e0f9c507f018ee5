//! Document readers: the DOCX package parser and plain-text loaders.

mod docx_parser;
mod pdf_parser;

pub use docx_parser::DocxParser;
pub(crate) use docx_parser::{STYLES_PART, WML_NS};
pub use pdf_parser::PdfText;

use std::path::Path;

use crate::detect::{detect_format_from_path, InputFormat};
use crate::error::{Error, Result};

/// Load the plain text of a DOCX, PDF or UTF-8 text file.
///
/// DOCX paragraphs are joined with newlines as they are, without cleaning;
/// PDF pages are joined with newlines.
pub fn load_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let format = detect_format_from_path(path)?;
    log::debug!("loading {} as {}", path.display(), format);

    match format {
        InputFormat::Docx => Ok(DocxParser::open(path)?.parse()?.plain_text()),
        InputFormat::Pdf => Ok(PdfText::open(path)?.extract()),
        InputFormat::Text => {
            let bytes = std::fs::read(path)?;
            String::from_utf8(bytes)
                .map_err(|e| Error::Encoding(format!("{}: {}", path.display(), e)))
        }
    }
}
