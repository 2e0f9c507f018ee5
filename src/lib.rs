//! # lexclean
//!
//! Cleans legislation and policy documents exported to DOCX.
//!
//! Word exports of legislation carry page furniture: horizontal rules made of
//! underscores or hyphens, blank spacer paragraphs, compilation stamps and
//! running footers. This library drops those paragraphs, collapses
//! interior whitespace while keeping the leading indentation that legal
//! numbering depends on, and writes a fresh document with the original run
//! formatting carried over.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> lexclean::Result<()> {
//!     let stats = lexclean::clean_file("ASIC2.docx", "asic2cleaned.docx")?;
//!     println!("kept {} of {} paragraphs", stats.kept, stats.input_paragraphs);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Artifact removal**: built-in patterns plus caller-supplied regexes
//! - **Indentation-preserving normalization**
//! - **Formatting transfer**: bold, italic, underline, font, size, alignment and style
//! - **Atomic output**: a failed run never leaves a partial file behind
//! - **Text extraction** from DOCX, PDF and plain text for compliance review
//! - **Compliance prompts**: message assembly for an external LLM

pub mod clean;
pub mod compliance;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use clean::{clean_document, CleanOptions, CleanResult, CleanStats, Cleaner, Verdict};
pub use compliance::{ComplianceSession, CompletionProvider, Message, Role};
pub use detect::{detect_format_from_bytes, detect_format_from_path, InputFormat};
pub use error::{Error, Result};
pub use model::{Alignment, Document, Paragraph, Run};
pub use parser::{load_text, DocxParser, PdfText};
pub use render::{save_docx, to_docx_bytes, JsonFormat};

use std::path::Path;

/// Load a DOCX file into the paragraph model.
///
/// # Example
///
/// ```no_run
/// let doc = lexclean::load_docx("ASIC2.docx").unwrap();
/// println!("Paragraphs: {}", doc.paragraph_count());
/// ```
pub fn load_docx<P: AsRef<Path>>(path: P) -> Result<Document> {
    DocxParser::open(path)?.parse()
}

/// Load a DOCX package from bytes.
pub fn load_docx_bytes(data: &[u8]) -> Result<Document> {
    DocxParser::from_bytes(data)?.parse()
}

/// Clean a DOCX file and save the result to `output`.
///
/// Either the whole document is written or nothing is: load, clean and save
/// failures all abort before `output` is touched.
///
/// # Example
///
/// ```no_run
/// let stats = lexclean::clean_file("ASIC2.docx", "asic2cleaned.docx").unwrap();
/// println!("removed {}", stats.removed());
/// ```
pub fn clean_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<CleanStats> {
    clean_file_with_options(input, output, CleanOptions::default())
}

/// Clean a DOCX file with custom options.
///
/// # Example
///
/// ```no_run
/// use lexclean::{clean_file_with_options, CleanOptions};
///
/// let options = CleanOptions::new()
///     .with_artifact_pattern(r"^Authorised Version .* registered")
///     .with_styles(false);
/// clean_file_with_options("ASIC2.docx", "asic2cleaned.docx", options).unwrap();
/// ```
pub fn clean_file_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: CleanOptions,
) -> Result<CleanStats> {
    let cleaner = Cleaner::new(options)?;
    let doc = load_docx(input)?;
    let result = cleaner.clean_with_stats(&doc);
    save_docx(&result.document, output)?;
    Ok(result.stats)
}

/// Clean an in-memory DOCX package and return the new package.
pub fn clean_bytes(data: &[u8], options: CleanOptions) -> Result<Vec<u8>> {
    let cleaner = Cleaner::new(options)?;
    let doc = load_docx_bytes(data)?;
    to_docx_bytes(&cleaner.clean(&doc))
}

/// Extract plain text from a DOCX, PDF or UTF-8 text file.
///
/// # Example
///
/// ```no_run
/// let policy = lexclean::extract_text("policy.pdf").unwrap();
/// println!("{}", policy);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    load_text(path)
}

/// Convert a DOCX file's paragraph model to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = load_docx(path)?;
    render::to_json(&doc, format)
}
