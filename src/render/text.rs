//! Plain text rendering.

use crate::model::Document;

/// Convert a document to plain text, one line per paragraph.
pub fn to_text(doc: &Document) -> String {
    doc.plain_text()
}
