//! Whitespace normalization that keeps legal indentation intact.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HORIZONTAL_WS: Regex = Regex::new(r"[ \t]+").unwrap();
}

fn is_horizontal_ws(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Normalize paragraph text.
///
/// The leading space/tab run of the input is re-emitted as the same number
/// of spaces. Interior space/tab runs collapse to one space, newlines stay,
/// and trailing whitespace is dropped. Returns an empty string when only
/// whitespace remains.
pub fn normalize_text(text: &str) -> String {
    let body = text.trim_start_matches(is_horizontal_ws);
    // Space and tab are single-byte, so the byte difference is the char count
    let indent = text.len() - body.len();

    let collapsed = HORIZONTAL_WS.replace_all(body, " ");
    let collapsed = collapsed.trim_end();
    if collapsed.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(indent + collapsed.len());
    out.extend(std::iter::repeat(' ').take(indent));
    out.push_str(collapsed);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_indent_and_collapses_interior() {
        assert_eq!(normalize_text("   (a)  Term   here  "), "   (a) Term here");
    }

    #[test]
    fn test_tab_indent_becomes_spaces() {
        assert_eq!(normalize_text("\t\t(i)\tsub item"), "  (i) sub item");
    }

    #[test]
    fn test_no_indent() {
        assert_eq!(normalize_text("Final clause   text."), "Final clause text.");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("    "), "");
        assert_eq!(normalize_text(" \t \n "), "");
    }

    #[test]
    fn test_newlines_are_preserved() {
        assert_eq!(normalize_text("line one  \nline   two"), "line one \nline two");
        assert_eq!(normalize_text("  \n  x"), "  \n x");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "   ",
            "   (a)  Term   here  ",
            "\t(b)\t\tthing",
            "  \n  x  ",
            "a \u{a0} b",
            "\u{0}\u{1}  \u{7f}",
            "Compilation No. 5   Compilation date: 03/04/2021",
            "no change",
        ];
        for s in samples {
            let once = normalize_text(s);
            assert_eq!(normalize_text(&once), once, "input: {:?}", s);
        }
    }
}
