//! Blank-line rules: leading, trailing and consecutive runs

use super::{Rule, RuleId};
use crate::document::{join_lines, preferred_terminator, split_lines, Line};

/// Longest run of blank lines left by [`ConsecutiveBlankLineCollapse`]
pub const MAX_BLANK_RUN: usize = 2;

/// Drop blank lines before the first non-blank line
pub struct LeadingBlankLineRemoval;

impl Rule for LeadingBlankLineRemoval {
    fn id(&self) -> RuleId {
        RuleId::LeadingBlankRemoval
    }

    fn apply(&self, text: &str) -> String {
        join_lines(split_lines(text).skip_while(Line::is_blank))
    }
}

/// Drop blank lines after the last non-blank line; the last line always
/// ends with a terminator when anything is left
///
/// Stray CRs at the end of an unterminated last line are dropped before the
/// terminator is added, so they never pair up into a new CRLF.
pub struct TrailingBlankLineRemoval;

impl Rule for TrailingBlankLineRemoval {
    fn id(&self) -> RuleId {
        RuleId::TrailingBlankRemoval
    }

    fn apply(&self, text: &str) -> String {
        let mut lines: Vec<Line> = split_lines(text).collect();
        while lines.last().is_some_and(Line::is_blank) {
            lines.pop();
        }
        let Some(last) = lines.last().copied() else {
            return String::new();
        };
        if last.is_terminated() {
            return join_lines(lines);
        }
        lines.pop();
        let mut out = join_lines(lines);
        out.push_str(last.content.trim_end_matches('\r'));
        out.push_str(preferred_terminator(text));
        out
    }
}

/// Runs of three or more blank lines shrink to [`MAX_BLANK_RUN`]
pub struct ConsecutiveBlankLineCollapse;

impl Rule for ConsecutiveBlankLineCollapse {
    fn id(&self) -> RuleId {
        RuleId::ConsecutiveBlankCollapse
    }

    fn apply(&self, text: &str) -> String {
        let mut run = 0;
        join_lines(split_lines(text).filter(|line| {
            if line.is_blank() {
                run += 1;
                run <= MAX_BLANK_RUN
            } else {
                run = 0;
                true
            }
        }))
    }
}
