//! Document cleaning: drop page furniture, normalize whitespace and carry
//! run formatting into a freshly built document.
//!
//! # Example
//!
//! ```
//! use lexclean::clean::{Cleaner, CleanOptions};
//! use lexclean::model::{Document, Paragraph};
//!
//! let doc = Document::from_paragraphs(vec![
//!     Paragraph::with_text("________"),
//!     Paragraph::with_text("  (1)  Duties   apply."),
//! ]);
//!
//! let cleaner = Cleaner::new(CleanOptions::default())?;
//! let cleaned = cleaner.clean(&doc);
//! assert_eq!(cleaned.paragraphs[0].text, "  (1) Duties apply.");
//! # Ok::<(), lexclean::Error>(())
//! ```

mod artifact;
mod normalize;
mod options;

pub use artifact::{is_pure_artifact, ArtifactClassifier, BUILTIN_PATTERNS};
pub use normalize::normalize_text;
pub use options::CleanOptions;

use serde::Serialize;

use crate::error::Result;
use crate::model::{Document, Paragraph, Run};

/// What the cleaner decided for a single paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Page furniture, dropped wholesale
    Artifact,
    /// Nothing left after normalization, dropped
    Empty,
    /// Rebuilt paragraph to emit
    Keep(Paragraph),
}

/// Counts collected while cleaning a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    /// Paragraphs in the source document
    pub input_paragraphs: usize,
    /// Paragraphs dropped as artifacts
    pub artifacts: usize,
    /// Paragraphs dropped because normalization left nothing
    pub emptied: usize,
    /// Paragraphs emitted
    pub kept: usize,
}

impl CleanStats {
    /// Total number of dropped paragraphs.
    pub fn removed(&self) -> usize {
        self.artifacts + self.emptied
    }
}

/// A cleaned document together with its statistics.
#[derive(Debug, Clone)]
pub struct CleanResult {
    /// The cleaned document
    pub document: Document,
    /// Cleaning statistics
    pub stats: CleanStats,
}

/// Document cleaner.
#[derive(Debug, Clone)]
pub struct Cleaner {
    classifier: ArtifactClassifier,
    keep_styles: bool,
}

impl Cleaner {
    /// Create a cleaner, compiling any extra artifact patterns.
    pub fn new(options: CleanOptions) -> Result<Self> {
        let classifier = ArtifactClassifier::with_patterns(&options.extra_patterns)?;
        Ok(Self {
            classifier,
            keep_styles: options.keep_styles,
        })
    }

    /// Classify and rebuild one paragraph.
    pub fn judge(&self, paragraph: &Paragraph) -> Verdict {
        if self.classifier.is_artifact(&paragraph.text) {
            return Verdict::Artifact;
        }

        let cleaned = normalize_text(&paragraph.text);
        if cleaned.is_empty() {
            return Verdict::Empty;
        }

        let mut out = Paragraph::new();
        out.alignment = paragraph.alignment.clone();
        out.style = paragraph.style.clone();

        if paragraph.has_runs() {
            // Runs keep their raw text; only run-less paragraphs get the
            // normalized text.
            for run in &paragraph.runs {
                out.add_run(Run {
                    text: run.text.clone(),
                    bold: run.bold,
                    italic: run.italic,
                    underline: run.underline,
                    font_name: run.font_name.clone(),
                    font_size: run.font_size,
                });
            }
        } else {
            out.add_run(Run::new(cleaned));
        }

        Verdict::Keep(out)
    }

    /// Clean a document, returning a new one.
    pub fn clean(&self, doc: &Document) -> Document {
        self.clean_with_stats(doc).document
    }

    /// Clean a document and report what was dropped.
    pub fn clean_with_stats(&self, doc: &Document) -> CleanResult {
        let mut output = Document::new();
        if self.keep_styles {
            output.styles = doc.styles.clone();
        }

        let mut stats = CleanStats {
            input_paragraphs: doc.paragraph_count(),
            ..Default::default()
        };

        for paragraph in &doc.paragraphs {
            match self.judge(paragraph) {
                Verdict::Artifact => stats.artifacts += 1,
                Verdict::Empty => stats.emptied += 1,
                Verdict::Keep(p) => {
                    stats.kept += 1;
                    output.add_paragraph(p);
                }
            }
        }

        log::debug!(
            "cleaned {} paragraphs: {} artifacts, {} empty, {} kept",
            stats.input_paragraphs,
            stats.artifacts,
            stats.emptied,
            stats.kept
        );

        CleanResult {
            document: output,
            stats,
        }
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self {
            classifier: ArtifactClassifier::new(),
            keep_styles: true,
        }
    }
}

/// Clean a document with the built-in patterns.
pub fn clean_document(doc: &Document) -> Document {
    Cleaner::default().clean(doc)
}
