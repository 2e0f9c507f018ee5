//! Page-furniture detection.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Result;

/// Built-in artifact patterns for legislation exports.
///
/// Each pattern carries its own anchors; matching is a search over the
/// trimmed paragraph text.
pub const BUILTIN_PATTERNS: &[&str] = &[
    // Separator rules
    r"^_+$",
    r"^-+$",
    // Revision stamp printed on every page
    r"^\s*Compilation No\. \d+ Compilation date: \d+/\d+/\d+\s*$",
    r"^\s*$",
    // Running footer, optionally followed by the page number
    r"^Anti-Money Laundering and Counter-Terrorism Financing Act 2006\s*\d*\s*$",
];

lazy_static! {
    static ref BUILTIN_ARTIFACTS: Vec<Regex> = BUILTIN_PATTERNS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();
}

/// Check whether a paragraph's text is purely a formatting artifact.
///
/// Total over all strings: empty input and control characters are fine.
pub fn is_pure_artifact(text: &str) -> bool {
    matches_any(&BUILTIN_ARTIFACTS, text)
}

fn matches_any(patterns: &[Regex], text: &str) -> bool {
    let trimmed = text.trim();
    patterns.iter().any(|re| re.is_match(trimmed))
}

/// Artifact classifier combining the built-in patterns with extra ones.
///
/// Extra patterns are searched anywhere in the trimmed text, so an
/// unanchored pattern drops every paragraph that contains it.
#[derive(Debug, Clone, Default)]
pub struct ArtifactClassifier {
    extra: Vec<Regex>,
}

impl ArtifactClassifier {
    /// Create a classifier with only the built-in patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with additional patterns.
    pub fn with_patterns<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra = patterns
            .into_iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { extra })
    }

    /// Number of extra patterns on top of the built-ins.
    pub fn extra_pattern_count(&self) -> usize {
        self.extra.len()
    }

    /// Check whether the text is an artifact under any pattern.
    pub fn is_artifact(&self, text: &str) -> bool {
        is_pure_artifact(text) || matches_any(&self.extra, text)
    }
}
