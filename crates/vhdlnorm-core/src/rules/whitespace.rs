//! Character-level whitespace rules: line endings, tabs, trailing blanks

use super::{Rule, RuleId};
use crate::document::{map_lines, split_lines};

/// CRLF → LF
///
/// Stray CRs piled up before a line break (`\r\r\n`) go with it, so one
/// pass leaves no CRLF behind.
pub struct LineEndingNormalization;

impl Rule for LineEndingNormalization {
    fn id(&self) -> RuleId {
        RuleId::LineEndingNormalization
    }

    fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for line in split_lines(text) {
            if line.is_terminated() {
                out.push_str(line.content.trim_end_matches('\r'));
                out.push('\n');
            } else {
                out.push_str(line.content);
            }
        }
        out
    }
}

/// Each tab becomes two spaces
pub struct TabExpansion;

const TAB_REPLACEMENT: &str = "  ";

impl Rule for TabExpansion {
    fn id(&self) -> RuleId {
        RuleId::TabExpansion
    }

    fn apply(&self, text: &str) -> String {
        text.replace('\t', TAB_REPLACEMENT)
    }
}

/// Strip spaces and tabs at end of line
///
/// The CR of a CRLF terminator lives in the terminator and is never seen
/// here. Stray CRs mixed into the trailing blanks are trimmed with them; if
/// the content ended in a CR, a single one is put back after the trim.
pub struct TrailingWhitespaceTrim;

impl Rule for TrailingWhitespaceTrim {
    fn id(&self) -> RuleId {
        RuleId::TrailingWhitespaceTrim
    }

    fn apply(&self, text: &str) -> String {
        map_lines(text, trim_line_end)
    }
}

fn trim_line_end(content: &str) -> String {
    let trimmed = content.trim_end_matches([' ', '\t', '\r']);
    if trimmed.is_empty() {
        // whitespace-only lines become empty, stray CRs included
        return String::new();
    }
    let cr = if content.ends_with('\r') { "\r" } else { "" };
    format!("{}{}", trimmed, cr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_to_lf() {
        assert_eq!(
            LineEndingNormalization.apply("a\r\nb\r\n"),
            "a\nb\n"
        );
    }

    #[test]
    fn test_lf_untouched() {
        assert_eq!(LineEndingNormalization.apply("a\nb\n"), "a\nb\n");
    }

    #[test]
    fn test_stray_cr_before_break_dropped() {
        assert_eq!(LineEndingNormalization.apply("a\r\r\nb\r\n"), "a\nb\n");
        let once = LineEndingNormalization.apply("x\r\r\n\r\r\r\ny\r");
        assert_eq!(once, "x\n\ny\r");
        assert_eq!(LineEndingNormalization.apply(&once), once);
    }

    #[test]
    fn test_lone_cr_is_not_a_line_ending() {
        assert_eq!(LineEndingNormalization.apply("a\rb\n"), "a\rb\n");
    }

    #[test]
    fn test_tabs_expand_to_two_spaces() {
        assert_eq!(TabExpansion.apply("\tx <= y;\t-- c\n"), "  x <= y;  -- c\n");
    }

    #[test]
    fn test_trim_spaces_and_tabs() {
        assert_eq!(
            TrailingWhitespaceTrim.apply("a <= b; \t \nc;\t\n"),
            "a <= b;\nc;\n"
        );
    }

    #[test]
    fn test_trim_preserves_crlf() {
        assert_eq!(
            TrailingWhitespaceTrim.apply("a  \r\nb\t\r\n"),
            "a\r\nb\r\n"
        );
    }

    #[test]
    fn test_whitespace_only_line_becomes_empty() {
        assert_eq!(TrailingWhitespaceTrim.apply("a\n   \t\nb\n"), "a\n\nb\n");
        assert_eq!(TrailingWhitespaceTrim.apply("  \r\n"), "\r\n");
    }

    #[test]
    fn test_stray_cr_on_last_line_kept() {
        assert_eq!(TrailingWhitespaceTrim.apply("a\r\nb  \r"), "a\r\nb\r");
    }

    #[test]
    fn test_stray_crs_mixed_with_blanks() {
        assert_eq!(TrailingWhitespaceTrim.apply("b \r\r"), "b\r");
        assert_eq!(TrailingWhitespaceTrim.apply("b\r \n"), "b\n");
        assert_eq!(TrailingWhitespaceTrim.apply("x \r \r\r\n"), "x\r\r\n");
    }

    #[test]
    fn test_leading_whitespace_kept() {
        assert_eq!(TrailingWhitespaceTrim.apply("    x;  "), "    x;");
    }

    #[test]
    fn test_trim_idempotent() {
        let once = TrailingWhitespaceTrim.apply("a \r\n \nb\t\r");
        assert_eq!(TrailingWhitespaceTrim.apply(&once), once);
    }
}
