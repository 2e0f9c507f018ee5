//! Paragraph and run-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of a word-processing document.
///
/// When `runs` is non-empty, `text` is the concatenation of the run texts.
/// A paragraph with no runs carries plain text only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Concatenated plain text
    pub text: String,

    /// Paragraph alignment, unset when inherited from the style
    pub alignment: Option<Alignment>,

    /// Paragraph style reference (style id)
    pub style: Option<String>,

    /// Formatted runs, in document order
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Create an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text and no runs.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a paragraph from runs; the text is derived from them.
    pub fn from_runs(runs: Vec<Run>) -> Self {
        let mut p = Self::new();
        for run in runs {
            p.add_run(run);
        }
        p
    }

    /// Set the alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Set the style reference.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Append a run and extend the paragraph text with it.
    pub fn add_run(&mut self, run: Run) {
        self.text.push_str(&run.text);
        self.runs.push(run);
    }

    /// Check if the paragraph has distinguished formatting spans.
    pub fn has_runs(&self) -> bool {
        !self.runs.is_empty()
    }

    /// Check if the paragraph text is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A span of text sharing one formatting set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// The text content
    pub text: String,

    /// Bold: explicitly on, explicitly off, or inherited
    pub bold: Option<bool>,

    /// Italic: explicitly on, explicitly off, or inherited
    pub italic: Option<bool>,

    /// Underline: explicitly on, explicitly off, or inherited
    pub underline: Option<bool>,

    /// Font name
    pub font_name: Option<String>,

    /// Font size in points
    pub font_size: Option<f32>,
}

impl Run {
    /// Create a run with inherited formatting.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set bold.
    pub fn bold(mut self, on: bool) -> Self {
        self.bold = Some(on);
        self
    }

    /// Set italic.
    pub fn italic(mut self, on: bool) -> Self {
        self.italic = Some(on);
        self
    }

    /// Set underline.
    pub fn underline(mut self, on: bool) -> Self {
        self.underline = Some(on);
        self
    }

    /// Set the font name.
    pub fn font(mut self, name: impl Into<String>) -> Self {
        self.font_name = Some(name.into());
        self
    }

    /// Set the font size in points.
    pub fn size(mut self, points: f32) -> Self {
        self.font_size = Some(points);
        self
    }

    /// Check if any formatting is set explicitly.
    pub fn has_formatting(&self) -> bool {
        self.bold.is_some()
            || self.italic.is_some()
            || self.underline.is_some()
            || self.font_name.is_some()
            || self.font_size.is_some()
    }
}

/// Paragraph alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left (start) alignment
    Left,
    /// Center alignment
    Center,
    /// Right (end) alignment
    Right,
    /// Justified alignment
    Justify,
    /// Distributed alignment
    Distribute,
    /// Any other WordprocessingML value, kept verbatim
    Other(String),
}

impl Alignment {
    /// Map a `w:jc` value to an alignment.
    pub fn from_wml(val: &str) -> Self {
        match val {
            "left" | "start" => Alignment::Left,
            "center" => Alignment::Center,
            "right" | "end" => Alignment::Right,
            "both" => Alignment::Justify,
            "distribute" => Alignment::Distribute,
            other => Alignment::Other(other.to_string()),
        }
    }

    /// The `w:jc` value for this alignment.
    pub fn as_wml(&self) -> &str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
            Alignment::Distribute => "distribute",
            Alignment::Other(val) => val,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text_follows_runs() {
        let mut p = Paragraph::new();
        p.add_run(Run::new("Hello ").bold(true));
        p.add_run(Run::new("world"));

        assert_eq!(p.text, "Hello world");
        assert_eq!(p.runs.len(), 2);
    }

    #[test]
    fn test_with_text_has_no_runs() {
        let p = Paragraph::with_text("plain");
        assert!(!p.has_runs());
        assert!(!p.is_blank());
        assert!(Paragraph::with_text(" \t").is_blank());
    }

    #[test]
    fn test_run_formatting() {
        let run = Run::new("x");
        assert!(!run.has_formatting());

        let run = Run::new("x").italic(false);
        assert!(run.has_formatting());
        assert_eq!(run.italic, Some(false));
        assert_eq!(run.bold, None);
    }

    #[test]
    fn test_alignment_wml_mapping() {
        assert_eq!(Alignment::from_wml("both"), Alignment::Justify);
        assert_eq!(Alignment::from_wml("start"), Alignment::Left);
        assert_eq!(Alignment::Justify.as_wml(), "both");

        let odd = Alignment::from_wml("thaiDistribute");
        assert_eq!(odd.as_wml(), "thaiDistribute");
    }
}
