//! Rule set - the individual text transformations
//!
//! Every rule is a pure `&str → String` function over the whole document.
//! Rules know nothing about files, configuration or each other; ordering and
//! enablement live in [`crate::pipeline`].
//!
//! # Rules (in pipeline order)
//!
//! | Name | Default |
//! |---|---|
//! | `line_ending_normalization` | off |
//! | `tab_expansion` | off |
//! | `comment_spacing` | on |
//! | `trailing_whitespace_trim` | on |
//! | `leading_blank_removal` | on |
//! | `trailing_blank_removal` | on |
//! | `consecutive_blank_collapse` | on |
//! | `boolean_simplification` | off |
//! | `time_unit_spacing` | on |
//! | `edge_expression_rewrite` | on |

pub mod blank_lines;
pub mod comments;
pub mod idioms;
pub mod lexical;
pub mod whitespace;

use std::fmt;
use std::str::FromStr;

use crate::Error;

pub use blank_lines::{
    ConsecutiveBlankLineCollapse, LeadingBlankLineRemoval, TrailingBlankLineRemoval,
};
pub use comments::CommentSpacing;
pub use idioms::{BooleanSimplification, EdgeExpressionRewrite, TimeUnitSpacing};
pub use whitespace::{LineEndingNormalization, TabExpansion, TrailingWhitespaceTrim};

/// A single named text transformation
pub trait Rule: Send + Sync {
    /// Stable identifier
    fn id(&self) -> RuleId;

    /// Transform the full document text. Must be deterministic and free of
    /// side effects.
    fn apply(&self, text: &str) -> String;
}

/// Stable rule identifiers, declared in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    LineEndingNormalization,
    TabExpansion,
    CommentSpacing,
    TrailingWhitespaceTrim,
    LeadingBlankRemoval,
    TrailingBlankRemoval,
    ConsecutiveBlankCollapse,
    BooleanSimplification,
    TimeUnitSpacing,
    EdgeExpressionRewrite,
}

impl RuleId {
    /// Every rule, in the order the pipeline runs them
    pub const ALL: [RuleId; 10] = [
        RuleId::LineEndingNormalization,
        RuleId::TabExpansion,
        RuleId::CommentSpacing,
        RuleId::TrailingWhitespaceTrim,
        RuleId::LeadingBlankRemoval,
        RuleId::TrailingBlankRemoval,
        RuleId::ConsecutiveBlankCollapse,
        RuleId::BooleanSimplification,
        RuleId::TimeUnitSpacing,
        RuleId::EdgeExpressionRewrite,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RuleId::LineEndingNormalization => "line_ending_normalization",
            RuleId::TabExpansion => "tab_expansion",
            RuleId::CommentSpacing => "comment_spacing",
            RuleId::TrailingWhitespaceTrim => "trailing_whitespace_trim",
            RuleId::LeadingBlankRemoval => "leading_blank_removal",
            RuleId::TrailingBlankRemoval => "trailing_blank_removal",
            RuleId::ConsecutiveBlankCollapse => "consecutive_blank_collapse",
            RuleId::BooleanSimplification => "boolean_simplification",
            RuleId::TimeUnitSpacing => "time_unit_spacing",
            RuleId::EdgeExpressionRewrite => "edge_expression_rewrite",
        }
    }

    /// Whether the rule runs when nothing overrides it
    pub fn enabled_by_default(self) -> bool {
        !matches!(
            self,
            RuleId::LineEndingNormalization
                | RuleId::TabExpansion
                | RuleId::BooleanSimplification
        )
    }

    pub fn description(self) -> &'static str {
        match self {
            RuleId::LineEndingNormalization => "Convert CRLF line endings to LF",
            RuleId::TabExpansion => "Replace each tab with two spaces",
            RuleId::CommentSpacing => "Put one space after a `--` comment marker",
            RuleId::TrailingWhitespaceTrim => "Strip spaces and tabs at end of line",
            RuleId::LeadingBlankRemoval => "Remove blank lines at the start of the file",
            RuleId::TrailingBlankRemoval => "Remove blank lines at the end of the file",
            RuleId::ConsecutiveBlankCollapse => "Collapse runs of 3+ blank lines to 2",
            RuleId::BooleanSimplification => "Rewrite `x = true` and `true = x` to `x`",
            RuleId::TimeUnitSpacing => "Separate numbers from time units (`10ns` -> `10 ns`)",
            RuleId::EdgeExpressionRewrite => {
                "Rewrite `clk'event and clk = '1'` to `rising_edge(clk)`"
            }
        }
    }

    /// The transformation behind this identifier
    pub fn rule(self) -> &'static dyn Rule {
        match self {
            RuleId::LineEndingNormalization => &LineEndingNormalization,
            RuleId::TabExpansion => &TabExpansion,
            RuleId::CommentSpacing => &CommentSpacing,
            RuleId::TrailingWhitespaceTrim => &TrailingWhitespaceTrim,
            RuleId::LeadingBlankRemoval => &LeadingBlankLineRemoval,
            RuleId::TrailingBlankRemoval => &TrailingBlankLineRemoval,
            RuleId::ConsecutiveBlankCollapse => &ConsecutiveBlankLineCollapse,
            RuleId::BooleanSimplification => &BooleanSimplification,
            RuleId::TimeUnitSpacing => &TimeUnitSpacing,
            RuleId::EdgeExpressionRewrite => &EdgeExpressionRewrite,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        RuleId::ALL
            .into_iter()
            .find(|id| id.name() == wanted)
            .ok_or_else(|| Error::UnknownRule(s.to_string()))
    }
}
