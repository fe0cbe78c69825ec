//! Parser configuration.

use serde::Deserialize;
use std::collections::BTreeSet;

/// Stock service tags a Couchbase node can run.
pub const DEFAULT_SERVICES: &[&str] = &["kv", "n1ql", "index", "fts", "cbas", "eventing", "backup"];

/// Options recognized by [`parse`](crate::parse::parse).
///
/// Deserializable so an orchestration tool can embed it in its own config:
///
/// ```toml
/// strict_sections = true
/// known_services = ["kv", "n1ql"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Reject unknown section names instead of keeping them as opaque data.
    pub strict_sections: bool,
    /// Allow-list of service tags. Empty accepts any non-empty tag.
    pub known_services: BTreeSet<String>,
}

impl ParseOptions {
    pub fn strict(mut self) -> Self {
        self.strict_sections = true;
        self
    }

    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_services.extend(services.into_iter().map(Into::into));
        self
    }

    pub fn with_default_services(self) -> Self {
        self.with_services(DEFAULT_SERVICES.iter().copied())
    }

    pub(crate) fn accepts_service(&self, tag: &str) -> bool {
        self.known_services.is_empty() || self.known_services.contains(tag)
    }
}
