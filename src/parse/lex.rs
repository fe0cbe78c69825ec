//! Line classification.
//!
//! Each physical line is one of:
//!   - blank or comment (`#` / `;` as first non-blank character): dropped
//!   - `[name]` at column 0: section header
//!   - `key = value` at column 0: entry (value may be empty)
//!   - anything indented: list item of the preceding key
//!
//! Indentation is measured here; grouping items under their key is the
//! section builder's job.

use crate::error::{ErrorKind, ParseError};
use regex::Regex;
use std::sync::LazyLock;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\[\]]*)\]\s*$").expect("header pattern"));

// Key runs up to the first '='; the value is the rest of the line.
static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^=\s][^=]*?)\s*=\s*(.*?)\s*$").expect("entry pattern"));

/// A value together with the physical line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Located<'a> {
    pub number: usize,
    pub raw: &'a str,
    pub value: &'a str,
}

impl<'a> Located<'a> {
    pub fn error(&self, kind: ErrorKind, detail: impl Into<String>) -> ParseError {
        ParseError::new(kind, self.number, self.raw, detail)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    Header(&'a str),
    Entry { key: &'a str, value: &'a str },
    Item(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    pub number: usize,
    pub indent: usize,
    pub raw: &'a str,
    pub kind: LineKind<'a>,
}

impl<'a> Line<'a> {
    pub fn located(&self, value: &'a str) -> Located<'a> {
        Located {
            number: self.number,
            raw: self.raw,
            value,
        }
    }

    pub fn error(&self, kind: ErrorKind, detail: impl Into<String>) -> ParseError {
        ParseError::new(kind, self.number, self.raw, detail)
    }
}

/// Classify every significant line of `text`.
pub(crate) fn lex(text: &str) -> Result<Vec<Line<'_>>, ParseError> {
    let mut out = Vec::new();
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    for (lineno, line) in text.lines().enumerate() {
        let number = lineno + 1;
        let raw = line.trim_end();
        let body = raw.trim_start();

        if body.is_empty() || body.starts_with('#') || body.starts_with(';') {
            continue;
        }

        let indent = raw.len() - body.len();
        if indent > 0 {
            if HEADER_RE.is_match(body) {
                return Err(ParseError::new(
                    ErrorKind::MalformedLine,
                    number,
                    raw,
                    "section headers must start at column 0",
                ));
            }
            out.push(Line {
                number,
                indent,
                raw,
                kind: LineKind::Item(body),
            });
            continue;
        }

        let kind = if let Some(caps) = HEADER_RE.captures(raw) {
            let name = caps.get(1).map_or("", |m| m.as_str()).trim();
            if name.is_empty() {
                return Err(ParseError::new(
                    ErrorKind::MalformedLine,
                    number,
                    raw,
                    "section header has an empty name",
                ));
            }
            LineKind::Header(name)
        } else if let Some(caps) = ENTRY_RE.captures(raw) {
            LineKind::Entry {
                key: caps.get(1).map_or("", |m| m.as_str()),
                value: caps.get(2).map_or("", |m| m.as_str()),
            }
        } else {
            return Err(ParseError::new(
                ErrorKind::MalformedLine,
                number,
                raw,
                "expected a [section] header or a `key = value` entry",
            ));
        };

        out.push(Line {
            number,
            indent,
            raw,
            kind,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(text: &str) -> Vec<(usize, usize, LineKind<'_>)> {
        lex(text)
            .unwrap()
            .into_iter()
            .map(|l| (l.number, l.indent, l.kind))
            .collect()
    }

    #[test]
    fn classifies_headers_entries_and_items() {
        let text = "[clusters] \ntitan =\n    172.23.96.100:kv,n1ql\n\n[storage]\ndata = /data\n";
        assert_eq!(
            kinds(text),
            vec![
                (1, 0, LineKind::Header("clusters")),
                (2, 0, LineKind::Entry { key: "titan", value: "" }),
                (3, 4, LineKind::Item("172.23.96.100:kv,n1ql")),
                (5, 0, LineKind::Header("storage")),
                (6, 0, LineKind::Entry { key: "data", value: "/data" }),
            ]
        );
    }

    #[test]
    fn value_keeps_later_equals_signs() {
        assert_eq!(
            kinds("CPU = a=b\n"),
            vec![(1, 0, LineKind::Entry { key: "CPU", value: "a=b" })]
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "# top\n; also\n   \n[clients]\n    # indented comment\n";
        assert_eq!(kinds(text), vec![(4, 0, LineKind::Header("clients"))]);
    }

    #[test]
    fn rejects_unrecognized_column_zero_lines() {
        let err = lex("[clients]\nhosts\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedLine);
        assert_eq!(err.line, 2);
        assert_eq!(err.text, "hosts");

        let err = lex("= value\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedLine);
    }

    #[test]
    fn rejects_indented_header() {
        let err = lex("[clusters]\ntitan =\n    a:kv\n    [storage]\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedLine);
        assert_eq!(err.line, 4);
        assert_eq!(err.text, "    [storage]");
    }

    #[test]
    fn strips_leading_byte_order_mark() {
        assert_eq!(
            kinds("\u{feff}[clusters]\n"),
            vec![(1, 0, LineKind::Header("clusters"))]
        );
    }

    #[test]
    fn rejects_empty_header() {
        let err = lex("[  ]\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedLine);
    }
}
