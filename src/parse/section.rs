//! Raw section structure.
//!
//! Groups lexed lines into sections and entries. List items are attached to
//! the most recent key using an explicit indentation stack: the stack holds
//! the column-0 level plus, while a block is open, the width its first item
//! established. Every later item must sit at exactly that width.

use crate::error::{ErrorKind, ParseError};
use crate::parse::lex::{Line, LineKind, Located};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RawValue<'a> {
    /// `key = value` with no following block. May be empty.
    Scalar(Located<'a>),
    /// `key =` followed by indented items. A non-empty inline value is the
    /// first item.
    List(Vec<Located<'a>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawEntry<'a> {
    pub key: &'a str,
    pub line: Line<'a>,
    pub value: RawValue<'a>,
}

impl<'a> RawEntry<'a> {
    fn push_item(&mut self, item: Located<'a>) {
        match &mut self.value {
            RawValue::List(items) => items.push(item),
            RawValue::Scalar(inline) => {
                let mut items = Vec::new();
                if !inline.value.is_empty() {
                    items.push(*inline);
                }
                items.push(item);
                self.value = RawValue::List(items);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawSection<'a> {
    pub name: &'a str,
    pub header: Line<'a>,
    pub entries: Vec<RawEntry<'a>>,
}

/// Build raw sections from lexed lines. Fails on structural errors only;
/// section contents are checked by the schema layer.
pub(crate) fn build_sections<'a>(lines: &[Line<'a>]) -> Result<Vec<RawSection<'a>>, ParseError> {
    let mut sections: Vec<RawSection<'a>> = Vec::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut indents: Vec<usize> = vec![0];

    for line in lines {
        match line.kind {
            LineKind::Header(name) => {
                if !seen.insert(name) {
                    return Err(line.error(
                        ErrorKind::DuplicateSection,
                        format!("section [{}] appears more than once", name),
                    ));
                }
                indents.truncate(1);
                sections.push(RawSection {
                    name,
                    header: *line,
                    entries: Vec::new(),
                });
            }
            LineKind::Entry { key, value } => {
                let section = sections.last_mut().ok_or_else(|| {
                    line.error(ErrorKind::MalformedLine, "entry before any [section] header")
                })?;
                indents.truncate(1);
                section.entries.push(RawEntry {
                    key,
                    line: *line,
                    value: RawValue::Scalar(line.located(value)),
                });
            }
            LineKind::Item(value) => {
                let section = sections.last_mut().ok_or_else(|| {
                    line.error(
                        ErrorKind::MalformedLine,
                        "indented line before any [section] header",
                    )
                })?;
                let name = section.name;
                let entry = section.entries.last_mut().ok_or_else(|| {
                    line.error(
                        ErrorKind::MalformedLine,
                        format!("indented line in [{}] has no owning key", name),
                    )
                })?;

                if indents.len() == 1 {
                    indents.push(line.indent);
                } else if indents[indents.len() - 1] != line.indent {
                    return Err(line.error(
                        ErrorKind::MalformedLine,
                        format!(
                            "inconsistent indentation under `{}`: expected {} columns, found {}",
                            entry.key,
                            indents[indents.len() - 1],
                            line.indent
                        ),
                    ));
                }

                entry.push_item(line.located(value));
            }
        }
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::lex::lex;
    use pretty_assertions::assert_eq;

    fn values<'a>(entry: &RawEntry<'a>) -> Vec<&'a str> {
        match &entry.value {
            RawValue::Scalar(v) => vec![v.value],
            RawValue::List(items) => items.iter().map(|i| i.value).collect(),
        }
    }

    #[test]
    fn groups_items_under_their_key() {
        let text = "[clients]\nhosts =\n  a\n  b\ncredentials = root:pw\n";
        let lines = lex(text).unwrap();
        let sections = build_sections(&lines).unwrap();

        assert_eq!(sections.len(), 1);
        let entries = &sections[0].entries;
        assert_eq!(entries[0].key, "hosts");
        assert_eq!(values(&entries[0]), vec!["a", "b"]);
        assert!(matches!(entries[0].value, RawValue::List(_)));
        assert_eq!(entries[1].key, "credentials");
        assert_eq!(values(&entries[1]), vec!["root:pw"]);
        assert!(matches!(entries[1].value, RawValue::Scalar(_)));
    }

    #[test]
    fn inline_value_becomes_first_item() {
        let lines = lex("[clients]\nhosts = a\n    b\n").unwrap();
        let sections = build_sections(&lines).unwrap();
        assert_eq!(values(&sections[0].entries[0]), vec!["a", "b"]);
    }

    #[test]
    fn each_block_sets_its_own_width() {
        let text = "[clusters]\nx =\n  1:kv\ny =\n      2:kv\n      3:kv\n";
        let lines = lex(text).unwrap();
        let sections = build_sections(&lines).unwrap();
        assert_eq!(values(&sections[0].entries[1]), vec!["2:kv", "3:kv"]);
    }

    #[test]
    fn inconsistent_indentation_is_rejected() {
        let text = "[clusters]\ntitan =\n    a:kv\n     b:kv\n";
        let lines = lex(text).unwrap();
        let err = build_sections(&lines).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedLine);
        assert_eq!(err.line, 4);

        let text = "[clusters]\ntitan =\n    a:kv\n  b:kv\n";
        let lines = lex(text).unwrap();
        let err = build_sections(&lines).unwrap_err();
        assert_eq!(err.line, 4);
    }

    #[test]
    fn orphan_items_are_rejected() {
        let err = build_sections(&lex("    a\n").unwrap()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedLine);

        let err = build_sections(&lex("[clients]\n    a\n").unwrap()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedLine);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn entry_before_header_is_rejected() {
        let err = build_sections(&lex("a = b\n").unwrap()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedLine);
        assert_eq!(err.line, 1);
    }

    #[test]
    fn duplicate_section_is_rejected() {
        let err = build_sections(&lex("[storage]\n[storage]\n").unwrap()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateSection);
        assert_eq!(err.line, 2);
    }
}
