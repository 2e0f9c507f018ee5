//! Error types for lexclean library.

use std::io;
use thiserror::Error;

/// Result type alias for lexclean operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, cleaning or saving documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a ZIP package, or a package entry could not be read.
    #[error("Invalid document package: {0}")]
    Package(String),

    /// A required package part is absent.
    #[error("Missing document part: {0}")]
    MissingPart(String),

    /// The document XML is malformed.
    #[error("XML error: {0}")]
    Xml(String),

    /// Error extracting text from a PDF.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// The PDF document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// A configured artifact pattern is not a valid regular expression.
    #[error("Invalid artifact pattern: {0}")]
    InvalidPattern(String),

    /// Error during rendering (DOCX, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// The completion provider failed to produce a response.
    #[error("Completion failed: {0}")]
    Completion(String),

    /// Text content is not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::FileNotFound => Error::MissingPart(err.to_string()),
            _ => Error::Package(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::Pdf(err.to_string()),
        }
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::InvalidPattern(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::MissingPart("word/document.xml".to_string());
        assert_eq!(
            err.to_string(),
            "Missing document part: word/document.xml"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_zip_error_conversion() {
        let err: Error = zip::result::ZipError::InvalidArchive("bad magic".into()).into();
        assert!(matches!(err, Error::Package(_)));

        let err: Error = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, Error::MissingPart(_)));
    }

    #[test]
    fn test_regex_error_conversion() {
        let err: Error = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }
}
