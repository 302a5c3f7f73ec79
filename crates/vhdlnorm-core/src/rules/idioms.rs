//! Idiom rewrites on code regions: boolean comparisons, time units, clock edges
//!
//! All three rules work line by line on code only (see [`map_code`]), so
//! string literals and comments are never rewritten.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::lexical::map_code;
use super::{Rule, RuleId};
use crate::document::map_lines;

fn map_code_lines<F>(text: &str, f: F) -> String
where
    F: Fn(&str) -> String,
{
    map_lines(text, |content| map_code(content, &f))
}

// ── Boolean simplification ────────────────────────────────

// `\w+` directly followed by optional blanks and `=` cannot be the left side
// of `<=`, `/=`, `:=`, `>=`, `?=`; `true\b` then rejects `=>` and longer words.
static WORD_EQ_TRUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\w+)[ \t]*=[ \t]*true\b").unwrap());
static TRUE_EQ_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btrue[ \t]*=[ \t]*(\w+)\b").unwrap());

/// `x = true` → `x`, `true = x` → `x`
///
/// Not idempotent on chained comparisons (`a = true = true` needs two passes).
pub struct BooleanSimplification;

impl Rule for BooleanSimplification {
    fn id(&self) -> RuleId {
        RuleId::BooleanSimplification
    }

    fn apply(&self, text: &str) -> String {
        map_code_lines(text, simplify_booleans)
    }
}

fn simplify_booleans(code: &str) -> String {
    let step = WORD_EQ_TRUE.replace_all(code, "$1");
    TRUE_EQ_WORD.replace_all(&step, "$1").into_owned()
}

// ── Time units ────────────────────────────────────────────

static GLUED_TIME_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([0-9][0-9_]*(?:\.[0-9][0-9_]*)?)(ps|ns|us|ms|sec|min|hr)\b").unwrap()
});

/// `10ns` → `10 ns`
pub struct TimeUnitSpacing;

impl Rule for TimeUnitSpacing {
    fn id(&self) -> RuleId {
        RuleId::TimeUnitSpacing
    }

    fn apply(&self, text: &str) -> String {
        map_code_lines(text, |code| {
            GLUED_TIME_UNIT.replace_all(code, "$1 $2").into_owned()
        })
    }
}

// ── Clock edges ───────────────────────────────────────────

// Group 1 is the character before the identifier; it keeps selected names
// (`r.clk'event`) and attribute chains out of the match.
static EVENT_THEN_LEVEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(^|[^\w.'])([a-z]\w*)'event[ \t]+and[ \t]+([a-z]\w*)[ \t]*=[ \t]*'([01])'",
    )
    .unwrap()
});
static LEVEL_THEN_EVENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(^|[^\w.'])([a-z]\w*)[ \t]*=[ \t]*'([01])'[ \t]+and[ \t]+([a-z]\w*)'event\b",
    )
    .unwrap()
});

/// `clk'event and clk = '1'` → `rising_edge(clk)`, `'0'` → `falling_edge(clk)`
///
/// Also accepts the operands the other way round. Both identifiers must name
/// the same signal (compared case-insensitively, as VHDL does); the spelling
/// from the `'event` operand is kept. A preceding `not` blocks the rewrite,
/// since it binds to the first operand only. Rules see one line at a time, so
/// a condition broken across lines (`clk'event and` / `clk = '1'`) is left
/// as written.
pub struct EdgeExpressionRewrite;

impl Rule for EdgeExpressionRewrite {
    fn id(&self) -> RuleId {
        RuleId::EdgeExpressionRewrite
    }

    fn apply(&self, text: &str) -> String {
        map_code_lines(text, rewrite_edges)
    }
}

fn rewrite_edges(code: &str) -> String {
    let step = EVENT_THEN_LEVEL.replace_all(code, |caps: &Captures| {
        edge_call(code, caps, &caps[2], &caps[3], &caps[4])
    });
    let step = step.into_owned();
    LEVEL_THEN_EVENT
        .replace_all(&step, |caps: &Captures| {
            edge_call(&step, caps, &caps[4], &caps[2], &caps[3])
        })
        .into_owned()
}

fn edge_call(
    haystack: &str,
    caps: &Captures,
    event_id: &str,
    level_id: &str,
    level: &str,
) -> String {
    let operand_start = caps.get(2).map_or(0, |m| m.start());
    if !event_id.eq_ignore_ascii_case(level_id) || negated(&haystack[..operand_start]) {
        return caps[0].to_string();
    }
    let function = if level == "1" {
        "rising_edge"
    } else {
        "falling_edge"
    };
    format!("{}{}({})", &caps[1], function, event_id)
}

fn negated(before: &str) -> bool {
    let before = before.trim_end();
    let Some(at) = before.len().checked_sub(3) else {
        return false;
    };
    let Some(tail) = before.get(at..) else {
        return false;
    };
    tail.eq_ignore_ascii_case("not")
        && !before[..at]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
}
