//! Document model types.
//!
//! Plain value types shared by the DOCX codec, the cleaner and the
//! renderers. Nothing here performs I/O.

mod document;
mod paragraph;

pub use document::Document;
pub use paragraph::{Alignment, Paragraph, Run};
