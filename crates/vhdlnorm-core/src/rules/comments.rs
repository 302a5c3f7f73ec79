//! Comment marker spacing

use super::lexical::comment_start;
use super::{Rule, RuleId};
use crate::document::map_lines;

/// `--comment` → `-- comment`
///
/// Only a marker of exactly two dashes is touched. Longer dash runs are
/// dividers (`----`, `---`) and `--=` is an annotation marker; both are left
/// alone, as are markers already followed by whitespace or ending the line.
pub struct CommentSpacing;

impl Rule for CommentSpacing {
    fn id(&self) -> RuleId {
        RuleId::CommentSpacing
    }

    fn apply(&self, text: &str) -> String {
        map_lines(text, space_comment)
    }
}

fn space_comment(content: &str) -> String {
    let Some(start) = comment_start(content) else {
        return content.to_string();
    };
    let marker = &content[start..];
    if marker.bytes().take_while(|&b| b == b'-').count() != 2 {
        return content.to_string();
    }
    match marker[2..].chars().next() {
        Some(c) if !c.is_whitespace() && c != '=' => {
            let (code, comment) = content.split_at(start + 2);
            format!("{} {}", code, comment)
        }
        _ => content.to_string(),
    }
}
