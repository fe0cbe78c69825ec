//! Cluster nodes and their service tags.
//!
//! Node line grammar inside `[clusters]`:
//!
//! ```text
//! <address>:<tag>[,<tag>]*
//! ```
//!
//! Example: `172.23.96.100:kv,n1ql`

use crate::error::ErrorKind;
use serde::Serialize;
use std::collections::BTreeSet;

/// A single machine in a cluster with the services it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSpec {
    address: String,
    services: BTreeSet<String>,
}

impl NodeSpec {
    pub(crate) fn new(address: String, services: BTreeSet<String>) -> Self {
        Self { address, services }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Never empty.
    pub fn services(&self) -> &BTreeSet<String> {
        &self.services
    }

    pub fn runs(&self, tag: &str) -> bool {
        self.services.contains(tag)
    }
}

/// Split a node line into its address and raw tags, in the order written.
///
/// Tags may repeat; the caller decides how to treat that.
pub(crate) fn split_node_line(item: &str) -> Result<(&str, Vec<&str>), (ErrorKind, String)> {
    let (address, services) = match item.split_once(':') {
        Some((a, s)) => (a.trim(), s.trim()),
        None => (item.trim(), ""),
    };

    if address.is_empty() {
        return Err((ErrorKind::MalformedLine, "node line has an empty address".to_string()));
    }
    if services.is_empty() {
        return Err((
            ErrorKind::EmptyServiceSet,
            format!("node {} lists no services", address),
        ));
    }

    let mut tags = Vec::new();
    for tag in services.split(',') {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err((
                ErrorKind::MalformedLine,
                format!("node {} has an empty service tag", address),
            ));
        }
        tags.push(tag);
    }

    Ok((address, tags))
}
