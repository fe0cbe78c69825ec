//! Spec layer: the validated, strongly typed cluster topology.
//!
//! Values here are only built by the parser. They carry no parsing logic
//! beyond the small token grammars (node lines, credential tokens) they own.

pub mod cluster;
pub mod credential;
pub mod node;

pub use cluster::{ClientSpec, Cluster, ClusterSpec};
pub use credential::CredentialPair;
pub use node::NodeSpec;
