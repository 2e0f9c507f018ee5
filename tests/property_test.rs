//! Property-based tests for the cleaning core.
//!
//! The classifier and normalizer are total over arbitrary text, and the
//! cleaner is a pure mapping from one document to another. These tests
//! explore that input space with proptest.

use lexclean::clean::{is_pure_artifact, normalize_text};
use lexclean::{Cleaner, Document, Paragraph, Run};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Paragraph text shaped like a legislation export: clauses, rules, spacers,
/// compilation stamps and arbitrary noise.
fn paragraph_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ \t]{0,4}\\(?[a-z0-9]{1,3}\\)?[ \t]{1,3}[A-Za-z ,.]{0,30}",
        "_{1,20}",
        "-{1,20}",
        "[ \t\n]{0,6}",
        (1u32..200, 1u32..29).prop_map(|(n, day)| format!(
            "Compilation No. {} Compilation date: {:02}/03/2020",
            n, day
        )),
        "\\PC{0,40}",
    ]
}

/// Documents whose paragraphs carry their input position as the style id.
/// Half of the paragraphs are split into two runs.
fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec((paragraph_text(), any::<bool>()), 0..24).prop_map(|items| {
        let paragraphs = items
            .into_iter()
            .enumerate()
            .map(|(i, (text, with_runs))| {
                let paragraph = if with_runs {
                    let mid = text
                        .char_indices()
                        .nth(text.chars().count() / 2)
                        .map(|(at, _)| at)
                        .unwrap_or(0);
                    let (head, tail) = text.split_at(mid);
                    Paragraph::from_runs(vec![Run::new(head), Run::new(tail).bold(true)])
                } else {
                    Paragraph::with_text(text)
                };
                paragraph.with_style(format!("S{}", i))
            })
            .collect();
        Document::from_paragraphs(paragraphs)
    })
}

fn source_index(paragraph: &Paragraph) -> usize {
    paragraph
        .style
        .as_deref()
        .and_then(|s| s.strip_prefix('S'))
        .and_then(|n| n.parse().ok())
        .expect("every generated paragraph has an S<index> style")
}

fn leading_blank_run(text: &str) -> usize {
    text.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

// ============================================================================
// Normalizer Properties
// ============================================================================

/// Property: normalizing twice changes nothing
#[test]
fn proptest_normalize_idempotent() {
    proptest!(|(text in "[ \t\n\r\u{a0}\u{3000}\u{b}a_(]{0,12}")| {
        let once = normalize_text(&text);
        prop_assert_eq!(normalize_text(&once), once);
    });

    proptest!(|(text in "\\PC{0,80}")| {
        let once = normalize_text(&text);
        prop_assert_eq!(normalize_text(&once), once);
    });
}

/// Property: a non-empty result keeps the original indentation width
#[test]
fn proptest_normalize_keeps_indent_width() {
    proptest!(|(text in paragraph_text())| {
        let out = normalize_text(&text);
        if !out.is_empty() {
            let width = leading_blank_run(&text);
            prop_assert!(out.starts_with(&" ".repeat(width)));
            prop_assert_eq!(leading_blank_run(&out), width);
        }
    });
}

/// Property: output never carries trailing whitespace or interior blank runs
#[test]
fn proptest_normalize_collapses_interior() {
    proptest!(|(text in "\\PC{0,80}")| {
        let out = normalize_text(&text);
        prop_assert_eq!(out.trim_end(), out.as_str());
        let body = out.trim_start_matches(' ');
        prop_assert!(!body.contains("  "));
        prop_assert!(!body.contains('\t'));
    });
}

// ============================================================================
// Classifier Properties
// ============================================================================

/// Property: the classifier is total and blank text is always an artifact
#[test]
fn proptest_classifier_total() {
    proptest!(|(text in any::<String>())| {
        let verdict = is_pure_artifact(&text);
        if text.trim().is_empty() {
            prop_assert!(verdict);
        }
    });
}

/// Property: rules of underscores or hyphens are artifacts at any length
#[test]
fn proptest_rules_are_artifacts() {
    proptest!(|(rule in "_{1,200}|-{1,200}", pad in "[ \t]{0,3}")| {
        let text = format!("{}{}{}", pad, rule, pad);
        prop_assert!(is_pure_artifact(&text));
    });
}

// ============================================================================
// Cleaner Properties
// ============================================================================

/// Property: the output is never longer than the input, and equal in length
/// exactly when nothing was droppable
#[test]
fn proptest_clean_count() {
    let cleaner = Cleaner::default();
    proptest!(|(doc in document())| {
        let result = cleaner.clean_with_stats(&doc);
        let out = &result.document;

        let droppable = doc
            .paragraphs
            .iter()
            .filter(|p| is_pure_artifact(&p.text) || normalize_text(&p.text).is_empty())
            .count();

        prop_assert!(out.paragraph_count() <= doc.paragraph_count());
        prop_assert_eq!(out.paragraph_count() + droppable, doc.paragraph_count());
        prop_assert_eq!(out.paragraph_count() == doc.paragraph_count(), droppable == 0);
        prop_assert_eq!(result.stats.kept, out.paragraph_count());
        prop_assert_eq!(result.stats.removed(), droppable);
    });
}

/// Property: output paragraphs appear in input order, each from a distinct
/// source paragraph
#[test]
fn proptest_clean_order_is_subsequence() {
    let cleaner = Cleaner::default();
    proptest!(|(doc in document())| {
        let out = cleaner.clean(&doc);
        let indices: Vec<usize> = out.paragraphs.iter().map(source_index).collect();
        prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
    });
}

/// Property: runs are carried raw, run-less paragraphs are normalized, and
/// paragraph text is always the concatenation of its runs
#[test]
fn proptest_clean_transfers_runs() {
    let cleaner = Cleaner::default();
    proptest!(|(doc in document())| {
        let out = cleaner.clean(&doc);
        for paragraph in &out.paragraphs {
            let source = &doc.paragraphs[source_index(paragraph)];
            if source.has_runs() {
                prop_assert_eq!(&paragraph.runs, &source.runs);
            } else {
                prop_assert_eq!(paragraph.runs.len(), 1);
                prop_assert_eq!(&paragraph.text, &normalize_text(&source.text));
            }
            let joined: String = paragraph.runs.iter().map(|r| r.text.as_str()).collect();
            prop_assert_eq!(&paragraph.text, &joined);
        }
    });
}

/// Property: cleaning never mutates its input
#[test]
fn proptest_clean_leaves_input_untouched() {
    let cleaner = Cleaner::default();
    proptest!(|(doc in document())| {
        let before = doc.clone();
        let _ = cleaner.clean(&doc);
        prop_assert_eq!(doc, before);
    });
}
