//! Per-section sub-parsers.
//!
//! The meaning of an entry depends on the section it sits in, so each known
//! header name selects its own micro-grammar:
//!
//! | section         | shape                                        |
//! |-----------------|----------------------------------------------|
//! | `[clusters]`    | name -> list of `address:tag[,tag]*`         |
//! | `[clients]`     | `hosts` list + `credentials = user:pass`     |
//! | `[storage]`     | flat name -> path                            |
//! | `[credentials]` | flat name -> `user:pass`                     |
//! | `[parameters]`  | flat name -> free-form string                |

use crate::diagnostics;
use crate::error::{ErrorKind, ParseError};
use crate::parse::ParseOptions;
use crate::parse::lex::Located;
use crate::parse::section::{RawEntry, RawSection, RawValue};
use crate::spec::node::split_node_line;
use crate::spec::{ClientSpec, Cluster, CredentialPair, NodeSpec};

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

pub(crate) const KNOWN_SECTIONS: &[&str] =
    &["clusters", "clients", "storage", "credentials", "parameters"];

/// A section after dispatch on its header name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Section {
    Cluster(Vec<Cluster>),
    Client(ClientSpec),
    Storage(BTreeMap<String, String>),
    Credential(BTreeMap<String, CredentialPair>),
    Parameter(BTreeMap<String, String>),
    Opaque(String, BTreeMap<String, String>),
}

pub(crate) fn parse_section(raw: &RawSection<'_>, options: &ParseOptions) -> Result<Section, ParseError> {
    let section = match raw.name {
        "clusters" => Section::Cluster(parse_clusters(raw, options)?),
        "clients" => Section::Client(parse_clients(raw, options)?),
        "storage" => Section::Storage(parse_flat(raw)?),
        "credentials" => Section::Credential(parse_credentials(raw)?),
        "parameters" => Section::Parameter(parse_flat(raw)?),
        other => {
            if options.strict_sections {
                return Err(raw.header.error(
                    ErrorKind::UnknownSection,
                    format!(
                        "unknown section [{}], expected one of: {}",
                        other,
                        KNOWN_SECTIONS.join(", ")
                    ),
                ));
            }
            diagnostics::warn(format!(
                "keeping unknown section [{}] (line {}) as opaque data",
                other, raw.header.number
            ));
            Section::Opaque(other.to_string(), parse_opaque(raw)?)
        }
    };

    debug!(section = raw.name, entries = raw.entries.len(), "parsed section");
    Ok(section)
}

fn parse_clusters(raw: &RawSection<'_>, options: &ParseOptions) -> Result<Vec<Cluster>, ParseError> {
    let mut clusters = Vec::new();
    let mut names: BTreeSet<&str> = BTreeSet::new();

    for entry in &raw.entries {
        if !names.insert(entry.key) {
            return Err(entry.line.error(
                ErrorKind::DuplicateClusterName,
                format!("cluster {} is defined more than once", entry.key),
            ));
        }

        let items = list_items(entry);
        if items.is_empty() {
            return Err(entry.line.error(
                ErrorKind::MalformedLine,
                format!("cluster {} has no nodes", entry.key),
            ));
        }

        let mut nodes: Vec<NodeSpec> = Vec::new();
        let mut addresses: BTreeSet<String> = BTreeSet::new();
        for item in items {
            let node = parse_node(item, options)?;
            if !addresses.insert(node.address().to_string()) {
                return Err(item.error(
                    ErrorKind::DuplicateNodeAddress,
                    format!(
                        "node {} appears more than once in cluster {}",
                        node.address(),
                        entry.key
                    ),
                ));
            }
            nodes.push(node);
        }

        clusters.push(Cluster::new(entry.key.to_string(), nodes));
    }

    Ok(clusters)
}

fn parse_node(item: &Located<'_>, options: &ParseOptions) -> Result<NodeSpec, ParseError> {
    let (address, tags) =
        split_node_line(item.value).map_err(|(kind, detail)| item.error(kind, detail))?;

    let mut services = BTreeSet::new();
    for tag in tags {
        if !options.accepts_service(tag) {
            return Err(item.error(
                ErrorKind::UnknownServiceTag,
                format!("node {} runs unknown service {:?}", address, tag),
            ));
        }
        if !services.insert(tag.to_string()) {
            diagnostics::warn(format!(
                "line {}: service {} listed twice for node {}",
                item.number, tag, address
            ));
        }
    }

    Ok(NodeSpec::new(address.to_string(), services))
}

fn parse_clients(raw: &RawSection<'_>, options: &ParseOptions) -> Result<ClientSpec, ParseError> {
    let mut clients = ClientSpec::default();
    let mut keys: BTreeSet<&str> = BTreeSet::new();

    for entry in &raw.entries {
        if !keys.insert(entry.key) {
            return Err(duplicate_key(raw, entry));
        }

        match entry.key {
            "hosts" => {
                for host in list_items(entry) {
                    if clients.hosts.iter().any(|h| h == host.value) {
                        return Err(host.error(
                            ErrorKind::DuplicateClientHost,
                            format!("client host {} is listed more than once", host.value),
                        ));
                    }
                    clients.hosts.push(host.value.to_string());
                }
            }
            "credentials" => {
                let token = scalar(entry)?;
                clients.credentials = Some(parse_credential(token)?);
            }
            other => {
                if options.strict_sections {
                    return Err(entry.line.error(
                        ErrorKind::MalformedLine,
                        format!("unknown key {} in [clients]", other),
                    ));
                }
                clients.extra.insert(other.to_string(), joined(entry));
            }
        }
    }

    Ok(clients)
}

fn parse_credentials(raw: &RawSection<'_>) -> Result<BTreeMap<String, CredentialPair>, ParseError> {
    let mut out = BTreeMap::new();
    for entry in &raw.entries {
        let token = scalar(entry)?;
        let pair = parse_credential(token)?;
        if out.insert(entry.key.to_string(), pair).is_some() {
            return Err(duplicate_key(raw, entry));
        }
    }
    Ok(out)
}

fn parse_credential(token: &Located<'_>) -> Result<CredentialPair, ParseError> {
    token
        .value
        .parse::<CredentialPair>()
        .map_err(|detail| token.error(ErrorKind::InvalidCredentialToken, detail))
}

fn parse_flat(raw: &RawSection<'_>) -> Result<BTreeMap<String, String>, ParseError> {
    let mut out = BTreeMap::new();
    for entry in &raw.entries {
        let value = scalar(entry)?;
        if out
            .insert(entry.key.to_string(), value.value.to_string())
            .is_some()
        {
            return Err(duplicate_key(raw, entry));
        }
    }
    Ok(out)
}

fn parse_opaque(raw: &RawSection<'_>) -> Result<BTreeMap<String, String>, ParseError> {
    let mut out = BTreeMap::new();
    for entry in &raw.entries {
        if out.insert(entry.key.to_string(), joined(entry)).is_some() {
            return Err(duplicate_key(raw, entry));
        }
    }
    Ok(out)
}

/// The single value of a flat entry. List values are rejected at the first item.
fn scalar<'e, 'a>(entry: &'e RawEntry<'a>) -> Result<&'e Located<'a>, ParseError> {
    match &entry.value {
        RawValue::Scalar(v) => Ok(v),
        RawValue::List(items) => {
            let detail = format!("`{}` takes a single value, not an indented list", entry.key);
            Err(match items.first() {
                Some(first) => first.error(ErrorKind::MalformedLine, detail),
                None => entry.line.error(ErrorKind::MalformedLine, detail),
            })
        }
    }
}

/// Items of a list entry; an inline scalar counts as one item, an empty one as none.
fn list_items<'e, 'a>(entry: &'e RawEntry<'a>) -> &'e [Located<'a>] {
    match &entry.value {
        RawValue::List(items) => items.as_slice(),
        RawValue::Scalar(v) if v.value.is_empty() => &[],
        RawValue::Scalar(v) => std::slice::from_ref(v),
    }
}

fn joined(entry: &RawEntry<'_>) -> String {
    match &entry.value {
        RawValue::Scalar(v) => v.value.to_string(),
        RawValue::List(items) => items
            .iter()
            .map(|i| i.value)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn duplicate_key(raw: &RawSection<'_>, entry: &RawEntry<'_>) -> ParseError {
    entry.line.error(
        ErrorKind::DuplicateKey,
        format!("key {} appears more than once in [{}]", entry.key, raw.name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::lex::lex;
    use crate::parse::section::build_sections;
    use pretty_assertions::assert_eq;

    fn one_section(text: &str, options: &ParseOptions) -> Result<Section, ParseError> {
        let lines = lex(text).unwrap();
        let sections = build_sections(&lines).unwrap();
        parse_section(&sections[0], options)
    }

    #[test]
    fn clusters_section() {
        let text = "[clusters]\ntitan =\n    10.0.0.1:kv,n1ql\n    10.0.0.2:eventing\n";
        let Section::Cluster(clusters) = one_section(text, &ParseOptions::default()).unwrap() else {
            panic!("expected cluster section");
        };
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].name(), "titan");
        let addrs: Vec<&str> = clusters[0].nodes().iter().map(|n| n.address()).collect();
        assert_eq!(addrs, vec!["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn duplicate_node_points_at_second_occurrence() {
        let text = "[clusters]\ntitan =\n    10.0.0.1:kv\n    10.0.0.1 : n1ql\n";
        let err = one_section(text, &ParseOptions::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateNodeAddress);
        assert_eq!(err.line, 4);
    }

    #[test]
    fn same_address_in_two_clusters_is_allowed() {
        let text = "[clusters]\na =\n    10.0.0.1:kv\nb =\n    10.0.0.1:kv\n";
        assert!(one_section(text, &ParseOptions::default()).is_ok());
    }

    #[test]
    fn cluster_without_nodes_is_malformed() {
        let err = one_section("[clusters]\ntitan =\n", &ParseOptions::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedLine);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn repeated_service_tag_collapses() {
        let text = "[clusters]\ntitan =\n    10.0.0.1:kv,kv\n";
        let Section::Cluster(clusters) = one_section(text, &ParseOptions::default()).unwrap() else {
            panic!("expected cluster section");
        };
        assert_eq!(clusters[0].nodes()[0].services().len(), 1);
    }

    #[test]
    fn unknown_service_tag_is_rejected_with_allow_list() {
        let text = "[clusters]\ntitan =\n    10.0.0.1:kv,views\n";
        let opts = ParseOptions::default().with_default_services();
        let err = one_section(text, &opts).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownServiceTag);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn flat_sections_reject_lists_and_duplicates() {
        let err = one_section("[storage]\ndata =\n    /a\n", &ParseOptions::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedLine);
        assert_eq!(err.line, 3);

        let err =
            one_section("[parameters]\nOS = a\nOS = b\n", &ParseOptions::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateKey);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn credentials_section_parses_pairs() {
        let text = "[credentials]\nrest = Administrator:password\nssh = root:couchbase\n";
        let Section::Credential(creds) = one_section(text, &ParseOptions::default()).unwrap() else {
            panic!("expected credential section");
        };
        assert_eq!(creds["rest"].username(), "Administrator");
        assert_eq!(creds["ssh"].password(), "couchbase");
    }

    #[test]
    fn client_extra_keys_depend_on_strictness() {
        let text = "[clients]\nhosts = 10.0.0.9\nworkers = 8\n";
        let Section::Client(clients) = one_section(text, &ParseOptions::default()).unwrap() else {
            panic!("expected client section");
        };
        assert_eq!(clients.hosts(), &["10.0.0.9".to_string()]);
        assert_eq!(clients.extra()["workers"], "8");

        let err = one_section(text, &ParseOptions::default().strict()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedLine);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn opaque_section_joins_list_values() {
        let text = "[metadata]\nsource =\n    a\n    b\n";
        let Section::Opaque(name, values) = one_section(text, &ParseOptions::default()).unwrap()
        else {
            panic!("expected opaque section");
        };
        assert_eq!(name, "metadata");
        assert_eq!(values["source"], "a\nb");
    }
}
