//! Lexical regions of a single line
//!
//! Just enough VHDL lexing to keep idiom rewrites out of string literals,
//! extended identifiers (`\10ns\`) and comments: a line is cut into code,
//! string-literal, extended-identifier and comment regions.
//! Character literals (`'-'`, `'"'`, `'1'`) stay inside code so that a dash or
//! quote literal never opens a comment or string.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Code,
    StringLiteral,
    ExtendedIdentifier,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub kind: RegionKind,
    pub range: Range<usize>,
}

/// Cut one line's content into regions, in order, covering the whole line
pub fn regions(content: &str) -> Vec<Region> {
    let bytes = content.as_bytes();
    let len = bytes.len();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < len {
        match bytes[i] {
            delim @ (b'"' | b'\\') => {
                let kind = if delim == b'"' {
                    RegionKind::StringLiteral
                } else {
                    RegionKind::ExtendedIdentifier
                };
                push(&mut out, RegionKind::Code, start..i);
                let end = delimited_end(bytes, i);
                push(&mut out, kind, i..end);
                i = end;
                start = end;
            }
            b'\'' if i + 2 < len && bytes[i + 2] == b'\'' => {
                i += 3;
            }
            b'-' if i + 1 < len && bytes[i + 1] == b'-' => {
                push(&mut out, RegionKind::Code, start..i);
                push(&mut out, RegionKind::Comment, i..len);
                return out;
            }
            _ => i += 1,
        }
    }
    push(&mut out, RegionKind::Code, start..len);
    out
}

fn push(out: &mut Vec<Region>, kind: RegionKind, range: Range<usize>) {
    if !range.is_empty() {
        out.push(Region { kind, range });
    }
}

/// End (exclusive) of the string literal or extended identifier opening at
/// `open`; a doubled delimiter (`""`, `\\`) is an escape. Unterminated
/// literals run to end of line.
fn delimited_end(bytes: &[u8], open: usize) -> usize {
    let delim = bytes[open];
    let mut j = open + 1;
    while j < bytes.len() {
        if bytes[j] == delim {
            if bytes.get(j + 1) == Some(&delim) {
                j += 2;
                continue;
            }
            return j + 1;
        }
        j += 1;
    }
    bytes.len()
}

/// Byte offset of the comment marker, if the line has one outside strings
/// and extended identifiers
pub fn comment_start(content: &str) -> Option<usize> {
    regions(content)
        .into_iter()
        .find(|r| r.kind == RegionKind::Comment)
        .map(|r| r.range.start)
}

/// Rewrite only the code regions of a line
pub fn map_code<F>(content: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(content.len());
    for region in regions(content) {
        let text = &content[region.range];
        match region.kind {
            RegionKind::Code => out.push_str(&f(text)),
            RegionKind::StringLiteral | RegionKind::ExtendedIdentifier | RegionKind::Comment => {
                out.push_str(text)
            }
        }
    }
    out
}
