//! Parse errors.
//!
//! Every failure points at one physical line of the input: its 1-based number,
//! the raw text, and a symbolic reason code the caller can match on.

use std::fmt;
use thiserror::Error;

/// Symbolic reason for a rejected spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Line does not fit the grammar of its section or indentation context.
    MalformedLine,
    /// Header names a section outside the known set (strict mode only).
    UnknownSection,
    /// A section header appears twice.
    DuplicateSection,
    /// A key appears twice in a flat section.
    DuplicateKey,
    DuplicateClusterName,
    DuplicateNodeAddress,
    /// A `[clients]` host is listed twice.
    DuplicateClientHost,
    /// `user:pass` token without a separator or with an empty side.
    InvalidCredentialToken,
    /// Node line without any service tag.
    EmptyServiceSet,
    /// Service tag outside the configured allow-list.
    UnknownServiceTag,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MalformedLine => "MalformedLine",
            ErrorKind::UnknownSection => "UnknownSection",
            ErrorKind::DuplicateSection => "DuplicateSection",
            ErrorKind::DuplicateKey => "DuplicateKey",
            ErrorKind::DuplicateClusterName => "DuplicateClusterName",
            ErrorKind::DuplicateNodeAddress => "DuplicateNodeAddress",
            ErrorKind::DuplicateClientHost => "DuplicateClientHost",
            ErrorKind::InvalidCredentialToken => "InvalidCredentialToken",
            ErrorKind::EmptyServiceSet => "EmptyServiceSet",
            ErrorKind::UnknownServiceTag => "UnknownServiceTag",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A rejected spec. Displayed as `line N: Code: detail: "text"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}: {detail}: {text:?}")]
pub struct ParseError {
    pub line: usize,
    pub text: String,
    pub kind: ErrorKind,
    pub detail: String,
}

impl ParseError {
    pub fn new(kind: ErrorKind, line: usize, text: &str, detail: impl Into<String>) -> Self {
        Self {
            line,
            text: text.to_string(),
            kind,
            detail: detail.into(),
        }
    }
}
