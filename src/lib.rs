//! Parser and validator for perf-test cluster spec files.
//!
//! A spec file describes clusters, their nodes and services, load-generator
//! clients, storage paths, credentials and free-form hardware parameters:
//!
//! ```text
//! [clusters]
//! titan =
//!     172.23.96.100:kv,n1ql
//!     172.23.96.106:eventing
//!
//! [clients]
//! hosts =
//!     172.23.97.208
//! credentials = root:couchbase
//! ```
//!
//! [`parse`] turns such text into an immutable [`ClusterSpec`] or a
//! [`ParseError`] naming the offending line.

pub mod diagnostics;
pub mod error;
pub mod parse;
pub mod render;
pub mod spec;

pub use error::{ErrorKind, ParseError};
pub use parse::{DEFAULT_SERVICES, ParseOptions, load_file, parse};
pub use render::to_spec_string;
pub use spec::{ClientSpec, Cluster, ClusterSpec, CredentialPair, NodeSpec};

pub type Result<T> = anyhow::Result<T>;
