//! Cleaning options.

/// Options for the document cleaner.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Extra artifact patterns (regular expressions) on top of the built-ins
    pub extra_patterns: Vec<String>,

    /// Carry the source style sheet into the cleaned document
    pub keep_styles: bool,
}

impl CleanOptions {
    /// Create new clean options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an extra artifact pattern.
    pub fn with_artifact_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.extra_patterns.push(pattern.into());
        self
    }

    /// Add several extra artifact patterns.
    pub fn with_artifact_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Enable or disable carrying the source style sheet.
    pub fn with_styles(mut self, keep: bool) -> Self {
        self.keep_styles = keep;
        self
    }
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            extra_patterns: Vec::new(),
            keep_styles: true,
        }
    }
}
