use crate::spec::ClusterSpec;
use std::collections::BTreeMap;
use std::fmt::{self, Write};

const INDENT: &str = "    ";

/// Render a spec back to the text format.
///
/// Sections come out in a fixed order (clusters, clients, storage,
/// credentials, parameters, then unknown sections by name); empty sections
/// are omitted. Parsing the output yields an equal spec.
pub fn to_spec_string(spec: &ClusterSpec) -> String {
    let mut out = String::new();
    write_spec(&mut out, spec).expect("writing to a String cannot fail");
    out
}

pub fn write_spec<W: Write>(out: &mut W, spec: &ClusterSpec) -> fmt::Result {
    if !spec.clusters().is_empty() {
        writeln!(out, "[clusters]")?;
        for cluster in spec.clusters() {
            writeln!(out, "{} =", cluster.name())?;
            for node in cluster.nodes() {
                let services: Vec<&str> = node.services().iter().map(String::as_str).collect();
                writeln!(out, "{}{}:{}", INDENT, node.address(), services.join(","))?;
            }
        }
    }

    let clients = spec.clients();
    if !clients.hosts().is_empty() || clients.credentials().is_some() || !clients.extra().is_empty()
    {
        writeln!(out, "[clients]")?;
        if !clients.hosts().is_empty() {
            writeln!(out, "hosts =")?;
            for host in clients.hosts() {
                writeln!(out, "{}{}", INDENT, host)?;
            }
        }
        if let Some(creds) = clients.credentials() {
            writeln!(out, "credentials = {}", creds)?;
        }
        write_entries(out, clients.extra())?;
    }

    write_flat(out, "storage", spec.storage())?;

    if !spec.credentials().is_empty() {
        writeln!(out, "[credentials]")?;
        for (name, pair) in spec.credentials() {
            writeln!(out, "{} = {}", name, pair)?;
        }
    }

    write_flat(out, "parameters", spec.parameters())?;

    for (name, values) in spec.extra_sections() {
        writeln!(out, "[{}]", name)?;
        write_entries(out, values)?;
    }

    Ok(())
}

fn write_flat<W: Write>(out: &mut W, name: &str, values: &BTreeMap<String, String>) -> fmt::Result {
    if values.is_empty() {
        return Ok(());
    }
    writeln!(out, "[{}]", name)?;
    write_entries(out, values)
}

// Multi-line values (joined list items) go back out as an indented block.
fn write_entries<W: Write>(out: &mut W, values: &BTreeMap<String, String>) -> fmt::Result {
    for (key, value) in values {
        if value.contains('\n') {
            writeln!(out, "{} =", key)?;
            for item in value.lines() {
                writeln!(out, "{}{}", INDENT, item)?;
            }
        } else if value.is_empty() {
            writeln!(out, "{} =", key)?;
        } else {
            writeln!(out, "{} = {}", key, value)?;
        }
    }
    Ok(())
}

impl fmt::Display for ClusterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_spec(f, self)
    }
}
