//! Output writers: the DOCX package plus text and JSON views of the model.

mod docx;
mod json;
mod text;

pub use docx::{save_docx, to_docx_bytes, write_docx};
pub use json::{to_json, JsonFormat};
pub use text::to_text;
