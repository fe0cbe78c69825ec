//! Spec file parsing.
//!
//! Three passes over the input, each failing closed on the first problem:
//! 1) `lex`: classify lines and measure indentation.
//! 2) `section`: group items under keys and keys under headers.
//! 3) `schema`: dispatch each section to its sub-parser and enforce the
//!    topology invariants.
//!
//! Structural problems (pass 1 and 2) are reported before content problems.

mod lex;
mod options;
mod schema;
mod section;

pub use options::{DEFAULT_SERVICES, ParseOptions};

use crate::diagnostics;
use crate::error::ParseError;
use crate::spec::ClusterSpec;
use schema::Section;

use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse spec text into a validated [`ClusterSpec`].
///
/// Pure and deterministic: the same text and options always give the same
/// result, and no partial spec is ever returned.
pub fn parse(text: &str, options: &ParseOptions) -> Result<ClusterSpec, ParseError> {
    let lines = lex::lex(text)?;
    let sections = section::build_sections(&lines)?;

    let mut spec = ClusterSpec::default();
    for raw in &sections {
        match schema::parse_section(raw, options)? {
            Section::Cluster(clusters) => spec.clusters = clusters,
            Section::Client(clients) => spec.clients = clients,
            Section::Storage(storage) => spec.storage = storage,
            Section::Credential(credentials) => spec.credentials = credentials,
            Section::Parameter(parameters) => spec.parameters = parameters,
            Section::Opaque(name, values) => {
                spec.extra_sections.insert(name, values);
            }
        }
    }

    debug!(
        clusters = spec.clusters.len(),
        servers = spec.servers().count(),
        clients = spec.clients.hosts.len(),
        "cluster spec parsed"
    );
    Ok(spec)
}

/// Read and parse a spec file.
pub fn load_file(path: impl AsRef<Path>, options: &ParseOptions) -> anyhow::Result<ClusterSpec> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| diagnostics::error_message(format!("read spec file {}", path.display())))?;

    parse(&text, options).with_context(|| {
        diagnostics::error_message(format!("invalid spec file {}", path.display()))
    })
}
