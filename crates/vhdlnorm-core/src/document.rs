//! Source documents and the line model shared by every rule
//!
//! A document is the decoded text of one file. Lines are split with
//! `split_inclusive('\n')`, so every line keeps its own terminator
//! (`"\r\n"`, `"\n"`, or nothing for an unterminated last line). Rules
//! rewrite line content and reattach the terminator untouched, which is how
//! CRLF files stay CRLF unless line-ending normalization runs.

use std::fmt;

use thiserror::Error;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

// ── Line model ────────────────────────────────────────────

/// One line of a document: content plus its original terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub content: &'a str,
    pub terminator: &'a str,
}

impl<'a> Line<'a> {
    fn from_segment(segment: &'a str) -> Self {
        let body_len = if segment.ends_with("\r\n") {
            segment.len() - 2
        } else if segment.ends_with('\n') {
            segment.len() - 1
        } else {
            segment.len()
        };
        let (content, terminator) = segment.split_at(body_len);
        Line {
            content,
            terminator,
        }
    }

    /// Blank: empty, or only spaces, tabs and carriage returns
    pub fn is_blank(&self) -> bool {
        is_blank(self.content)
    }

    pub fn is_terminated(&self) -> bool {
        !self.terminator.is_empty()
    }
}

/// Split text into lines, each carrying its terminator
pub fn split_lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.split_inclusive('\n').map(Line::from_segment)
}

/// Whether a line's content counts as blank
pub fn is_blank(content: &str) -> bool {
    content.chars().all(|c| matches!(c, ' ' | '\t' | '\r'))
}

/// Rewrite each line's content, keeping terminators
pub fn map_lines<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(text.len());
    for line in split_lines(text) {
        out.push_str(&f(line.content));
        out.push_str(line.terminator);
    }
    out
}

/// Join lines back into text
pub fn join_lines<'a, I>(lines: I) -> String
where
    I: IntoIterator<Item = Line<'a>>,
{
    let mut out = String::new();
    for line in lines {
        out.push_str(line.content);
        out.push_str(line.terminator);
    }
    out
}

/// Terminator to use when one has to be added: CRLF if the text already
/// has any CRLF line, LF otherwise
pub fn preferred_terminator(text: &str) -> &'static str {
    if text.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

// ── Line endings ──────────────────────────────────────────

/// Line-terminator style detected in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// No terminated lines at all
    None,
    Lf,
    Crlf,
    /// Both LF-only and CRLF lines present
    Mixed,
}

impl LineEnding {
    pub fn detect(text: &str) -> Self {
        let mut lf = false;
        let mut crlf = false;
        for line in split_lines(text) {
            match line.terminator {
                "\r\n" => crlf = true,
                "\n" => lf = true,
                _ => {}
            }
        }
        match (lf, crlf) {
            (false, false) => LineEnding::None,
            (true, false) => LineEnding::Lf,
            (false, true) => LineEnding::Crlf,
            (true, true) => LineEnding::Mixed,
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            LineEnding::None => "none",
            LineEnding::Lf => "LF",
            LineEnding::Crlf => "CRLF",
            LineEnding::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

// ── Documents ─────────────────────────────────────────────

/// Why raw bytes were refused as source text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingIssue {
    #[error("contains NUL bytes (binary file?)")]
    NulBytes,
    #[error("UTF-16 byte-order mark found; only UTF-8 is supported")]
    Utf16,
    #[error("not valid UTF-8 at byte {0}")]
    InvalidUtf8(usize),
}

/// In-memory text of one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    text: String,
    bom: bool,
}

impl SourceDocument {
    /// Wrap already-decoded text. A leading BOM is split off and kept aside.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        match text.strip_prefix('\u{feff}') {
            Some(rest) => SourceDocument {
                text: rest.to_string(),
                bom: true,
            },
            None => SourceDocument { text, bom: false },
        }
    }

    /// Decode file bytes, refusing anything that is not UTF-8 text
    pub fn decode(bytes: &[u8]) -> Result<Self, EncodingIssue> {
        if bytes.starts_with(&[0xFF, 0xFE]) || bytes.starts_with(&[0xFE, 0xFF]) {
            return Err(EncodingIssue::Utf16);
        }
        if bytes.contains(&0) {
            return Err(EncodingIssue::NulBytes);
        }
        let (bom, body) = match bytes.strip_prefix(UTF8_BOM) {
            Some(rest) => (true, rest),
            None => (false, bytes),
        };
        let text = std::str::from_utf8(body)
            .map_err(|e| EncodingIssue::InvalidUtf8(e.valid_up_to() + if bom { 3 } else { 0 }))?;
        Ok(SourceDocument {
            text: text.to_string(),
            bom,
        })
    }

    /// Bytes to write back, with the original BOM restored
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.text.len() + 3);
        if self.bom {
            out.extend_from_slice(UTF8_BOM);
        }
        out.extend_from_slice(self.text.as_bytes());
        out
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Replace the text, keeping encoding metadata
    pub fn replace_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn has_bom(&self) -> bool {
        self.bom
    }

    pub fn line_ending(&self) -> LineEnding {
        LineEnding::detect(&self.text)
    }

    pub fn has_trailing_terminator(&self) -> bool {
        self.text.ends_with('\n')
    }

    /// Line contents without terminators
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        split_lines(&self.text).map(|line| line.content)
    }

    pub fn line_count(&self) -> usize {
        split_lines(&self.text).count()
    }
}
