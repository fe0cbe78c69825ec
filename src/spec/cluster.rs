//! The validated cluster spec and the topology queries run against it.

use crate::spec::{CredentialPair, NodeSpec};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A named group of nodes, in the order they were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    name: String,
    nodes: Vec<NodeSpec>,
}

impl Cluster {
    pub(crate) fn new(name: String, nodes: Vec<NodeSpec>) -> Self {
        Self { name, nodes }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    /// First node of the cluster; the harness drives the cluster through it.
    pub fn master(&self) -> Option<&NodeSpec> {
        self.nodes.first()
    }

    pub fn node(&self, address: &str) -> Option<&NodeSpec> {
        self.nodes.iter().find(|n| n.address() == address)
    }
}

/// Load-generator hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientSpec {
    pub(crate) hosts: Vec<String>,
    pub(crate) credentials: Option<CredentialPair>,
    /// Unrecognized keys kept verbatim in lenient mode.
    pub(crate) extra: BTreeMap<String, String>,
}

impl ClientSpec {
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn credentials(&self) -> Option<&CredentialPair> {
        self.credentials.as_ref()
    }

    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }
}

/// Root value produced by a successful parse. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterSpec {
    pub(crate) clusters: Vec<Cluster>,
    pub(crate) clients: ClientSpec,
    pub(crate) storage: BTreeMap<String, String>,
    pub(crate) credentials: BTreeMap<String, CredentialPair>,
    pub(crate) parameters: BTreeMap<String, String>,
    pub(crate) extra_sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl ClusterSpec {
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn cluster(&self, name: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.name() == name)
    }

    pub fn clients(&self) -> &ClientSpec {
        &self.clients
    }

    pub fn storage(&self) -> &BTreeMap<String, String> {
        &self.storage
    }

    pub fn credentials(&self) -> &BTreeMap<String, CredentialPair> {
        &self.credentials
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Sections outside the known set, preserved as key->string data.
    pub fn extra_sections(&self) -> &BTreeMap<String, BTreeMap<String, String>> {
        &self.extra_sections
    }

    /// Every node address across all clusters, in file order.
    pub fn servers(&self) -> impl Iterator<Item = &str> + '_ {
        self.clusters
            .iter()
            .flat_map(|c| c.nodes().iter().map(NodeSpec::address))
    }

    /// First node address of each cluster.
    pub fn masters(&self) -> impl Iterator<Item = &str> + '_ {
        self.clusters
            .iter()
            .filter_map(Cluster::master)
            .map(NodeSpec::address)
    }

    /// Services of a node. Looks in the first cluster that contains the address.
    pub fn roles(&self, address: &str) -> Option<&BTreeSet<String>> {
        self.clusters
            .iter()
            .find_map(|c| c.node(address))
            .map(NodeSpec::services)
    }

    /// Addresses of every node running `tag`, in file order.
    pub fn servers_by_role<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.clusters
            .iter()
            .flat_map(|c| c.nodes().iter())
            .filter(move |n| n.runs(tag))
            .map(NodeSpec::address)
    }

    pub fn client_hosts(&self) -> &[String] {
        self.clients.hosts()
    }

    pub fn client_credentials(&self) -> Option<&CredentialPair> {
        self.clients.credentials()
    }

    pub fn rest_credentials(&self) -> Option<&CredentialPair> {
        self.credentials.get("rest")
    }

    pub fn ssh_credentials(&self) -> Option<&CredentialPair> {
        self.credentials.get("ssh")
    }

    pub fn data_path(&self) -> Option<&str> {
        self.storage.get("data").map(String::as_str)
    }

    pub fn index_path(&self) -> Option<&str> {
        self.storage.get("index").map(String::as_str)
    }

    pub fn backup_path(&self) -> Option<&str> {
        self.storage.get("backup").map(String::as_str)
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }
}
